//! Interactive text menu over a catalog session.
//!
//! The loop reads from any `BufRead` and writes to any `Write`, so the
//! binary drives it with stdin/stdout and tests drive it with byte slices.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chiplist::record::{Processor, parse_graphics_flag};
use chiplist::{Catalog, ChiplistError};
use thiserror::Error;
use tracing::{debug, info};

/// Why the current menu step stopped early.
#[derive(Debug, Error)]
enum Halt {
    /// Input closed mid-session; treated like choosing "exit".
    #[error("end of input")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),
}

type Step<T> = std::result::Result<T, Halt>;

/// Whether the loop keeps going after a step.
enum Flow {
    Continue,
    Quit,
}

/// Where a newly entered record goes.
#[derive(Clone, Copy)]
enum Placement {
    End,
    Position,
    Front,
}

/// The interactive catalog menu.
pub struct Menu<R, W> {
    catalog: Catalog,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Creates a menu that owns `catalog` for the whole session.
    pub fn new(catalog: Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Returns the catalog and the output sink.
    #[cfg(test)]
    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.output)
    }

    /// Runs until the user picks exit or input ends.
    ///
    /// Catalog errors are printed and the loop continues; only I/O errors
    /// on the console itself are returned.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(Halt::EndOfInput) => {
                    writeln!(self.output)?;
                    break;
                }
                Err(Halt::Io(e)) => return Err(e),
            }
        }

        info!("menu session ended");
        self.output.flush()
    }

    fn step(&mut self) -> Step<Flow> {
        self.print_menu()?;
        let line = self.read_line()?;

        let Ok(choice) = line.trim().parse::<u32>() else {
            writeln!(self.output, "\nInvalid option")?;
            return Ok(Flow::Continue);
        };
        debug!(choice, "menu option selected");

        match choice {
            0 => {
                writeln!(self.output, "Program finished!")?;
                return Ok(Flow::Quit);
            }
            1 => self.insert(Placement::End)?,
            2 => self.insert(Placement::Position)?,
            3 => self.insert(Placement::Front)?,
            4 => self.list()?,
            5 => self.remove()?,
            6 => self.update()?,
            7 => self.search()?,
            8 => self.count()?,
            9 => self.destroy()?,
            10 => self.load()?,
            11 => self.save()?,
            12 => self.restore()?,
            _ => writeln!(self.output, "\nInvalid option")?,
        }

        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "------ PROCESSOR CATALOG -------")?;
        writeln!(self.output)?;
        writeln!(self.output, "Choose an option:")?;
        writeln!(self.output, "  1 - Insert an item at the end of the list")?;
        writeln!(self.output, "  2 - Insert an item at a chosen position")?;
        writeln!(self.output, "  3 - Insert an item at the start of the list")?;
        writeln!(self.output, "  4 - Show all registered items")?;
        writeln!(self.output, "  5 - Remove an item from the list")?;
        writeln!(self.output, "  6 - Update an item in the list")?;
        writeln!(self.output, "  7 - Search for an item in the list")?;
        writeln!(self.output, "  8 - Show the number of registered items")?;
        writeln!(self.output, "  9 - Delete the list")?;
        writeln!(self.output, " 10 - Read the items from the catalog file")?;
        writeln!(self.output, " 11 - Save the items to the catalog file")?;
        writeln!(self.output, " 12 - Restore the items from the catalog file")?;
        writeln!(self.output, "  0 - Exit")?;
        writeln!(self.output)?;
        write!(self.output, "Option: ")
    }

    fn insert(&mut self, placement: Placement) -> Step<()> {
        let title = match placement {
            Placement::End => "INSERT ITEM AT THE END OF THE LIST",
            Placement::Position => "INSERT ITEM AT A CHOSEN POSITION",
            Placement::Front => "INSERT ITEM AT THE START OF THE LIST",
        };
        writeln!(self.output, "\n------ {title} -------\n")?;

        let record = self.prompt_record("")?;
        let result = match placement {
            Placement::End => self.catalog.append(record),
            Placement::Front => self.catalog.insert_front(record),
            Placement::Position => {
                let position = self.prompt_position("Enter the desired position")?;
                self.catalog.insert_at(record, position)
            }
        };

        match result {
            Ok(()) => writeln!(self.output, "\nItem inserted!")?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn list(&mut self) -> Step<()> {
        match self.catalog.records() {
            Ok(records) if records.is_empty() => writeln!(self.output, "List is empty")?,
            Ok(records) => {
                for (position, record) in records {
                    write_listing(&mut self.output, position, record)?;
                    writeln!(self.output)?;
                }
            }
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn remove(&mut self) -> Step<()> {
        writeln!(self.output, "\n------ REMOVE ITEM FROM THE LIST -------\n")?;
        let position = self.prompt_position("Enter the position of the item to remove")?;

        match self.catalog.remove_at(position) {
            Ok(_) => writeln!(self.output, "Item removed!")?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn update(&mut self) -> Step<()> {
        writeln!(self.output, "\n------ UPDATE ITEM IN THE LIST -------\n")?;
        let record = self.prompt_record("new ")?;
        let position = self.prompt_position("Enter the position of the item to update")?;

        match self.catalog.update_at(record, position) {
            Ok(_) => writeln!(self.output, "Item updated!")?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn search(&mut self) -> Step<()> {
        writeln!(self.output, "\n------ SEARCH ITEM -------\n")?;
        let position = self.prompt_position("Enter the position of the item to search")?;

        match self.catalog.get_at(position) {
            Ok(record) => write_listing(&mut self.output, position, record)?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn count(&mut self) -> Step<()> {
        match self.catalog.len() {
            Ok(len) => writeln!(self.output, "Registered items: {len}")?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn destroy(&mut self) -> Step<()> {
        match self.catalog.destroy() {
            Ok(()) => writeln!(self.output, "List deleted!")?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn load(&mut self) -> Step<()> {
        match self.catalog.load() {
            Ok(text) => write!(self.output, "{text}")?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn save(&mut self) -> Step<()> {
        match self.catalog.save() {
            Ok(count) => writeln!(
                self.output,
                "Saved {count} item(s) to {}",
                self.catalog.dump_path().display()
            )?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    fn restore(&mut self) -> Step<()> {
        match self.catalog.restore() {
            Ok(count) => writeln!(self.output, "Restored {count} item(s)")?,
            Err(e) => report(&mut self.output, &e)?,
        }
        Ok(())
    }

    /// Prompts for every field of a record. `adjective` prefixes the
    /// numeric labels ("new " when updating).
    fn prompt_record(&mut self, adjective: &str) -> Step<Processor> {
        let name = self.prompt_name("Enter the processor model")?;
        let cores = self.prompt_parsed(&format!("Enter the {adjective}number of cores"))?;
        let threads = self.prompt_parsed(&format!("Enter the {adjective}number of threads"))?;
        let node_nm = self.prompt_parsed(&format!("Enter the {adjective}lithography (nm)"))?;
        let base_clock_ghz = self.prompt_parsed(&format!("Enter the {adjective}base clock (GHz)"))?;
        let boost_clock_ghz = self.prompt_parsed(&format!("Enter the {adjective}boost clock (GHz)"))?;
        let tdp_watts = self.prompt_parsed(&format!("Enter the {adjective}TDP (W)"))?;
        let integrated_graphics = self.prompt_flag()?;

        Ok(Processor {
            name,
            cores,
            threads,
            node_nm,
            base_clock_ghz,
            boost_clock_ghz,
            tdp_watts,
            integrated_graphics,
        })
    }

    fn prompt_name(&mut self, label: &str) -> Step<String> {
        loop {
            let line = self.prompt(label)?;
            let name = line.trim();
            if !name.is_empty() {
                return Ok(name.to_string());
            }
        }
    }

    fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> Step<T> {
        loop {
            let line = self.prompt(label)?;
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Invalid value '{}', try again.", line.trim())?,
            }
        }
    }

    /// Reads a signed position. Negative values are never occupied, so they
    /// map to 0 and the catalog rejects them as an invalid position.
    fn prompt_position(&mut self, label: &str) -> Step<usize> {
        let position: i64 = self.prompt_parsed(label)?;
        Ok(usize::try_from(position).unwrap_or(0))
    }

    fn prompt_flag(&mut self) -> Step<bool> {
        loop {
            let line = self.prompt("Does the processor have integrated graphics? (y for yes, n for no)")?;
            match parse_graphics_flag(&line) {
                Ok(flag) => return Ok(flag),
                Err(e) => report(&mut self.output, &e)?,
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Step<String> {
        write!(self.output, "{label}: ")?;
        self.read_line()
    }

    fn read_line(&mut self) -> Step<String> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Halt::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Writes one record in the console listing layout.
fn write_listing<W: Write>(out: &mut W, position: usize, record: &Processor) -> io::Result<()> {
    writeln!(out, "\nModel {position}: {}", record.name)?;
    writeln!(out, "  Cores: {}", record.cores)?;
    writeln!(out, "  Threads: {}", record.threads)?;
    writeln!(out, "  Lithography: {} nm", record.node_nm)?;
    writeln!(out, "  Base clock: {:.2} GHz", record.base_clock_ghz)?;
    writeln!(out, "  Boost clock: {:.2} GHz", record.boost_clock_ghz)?;
    writeln!(out, "  TDP: {}W", record.tdp_watts)?;
    writeln!(out, "  Integrated graphics: {}", record.graphics_flag())?;
    writeln!(out, "{}", chiplist::dump::SEPARATOR)
}

fn report<W: Write>(out: &mut W, err: &ChiplistError) -> io::Result<()> {
    writeln!(out, "\n{err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiplist::CatalogConfig;
    use std::path::Path;
    use tempfile::tempdir;

    const RYZEN: &str = "Ryzen 5 5600X\n6\n12\n7\n3.7\n4.6\n65\nn\n";
    const INTEL: &str = "Core i5-12400\n6\n12\n10\n2.5\n4.4\n65\ns\n";

    fn run_session(dir: &Path, capacity: usize, script: &str) -> (Catalog, String) {
        let catalog = Catalog::open(CatalogConfig {
            capacity,
            dump_path: dir.join("catalog.txt"),
        })
        .unwrap();

        let mut menu = Menu::new(catalog, script.as_bytes(), Vec::new());
        menu.run().unwrap();

        let (catalog, output) = menu.into_parts();
        (catalog, String::from_utf8(output).unwrap())
    }

    fn names(catalog: &Catalog) -> Vec<String> {
        catalog
            .records()
            .unwrap()
            .into_iter()
            .map(|(_, r)| r.name.clone())
            .collect()
    }

    #[test]
    fn test_exit_immediately() {
        let dir = tempdir().unwrap();
        let (catalog, output) = run_session(dir.path(), 5, "0\n");

        assert!(output.contains("------ PROCESSOR CATALOG -------"));
        assert!(output.ends_with("Program finished!\n"));
        assert_eq!(catalog.len().unwrap(), 0);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let dir = tempdir().unwrap();

        let (_, output) = run_session(dir.path(), 5, "");
        assert!(output.ends_with("Option: \n"));

        // Input ending halfway through a record discards that record
        let (catalog, _) = run_session(dir.path(), 5, "1\nRyzen 5 5600X\n6\n");
        assert_eq!(catalog.len().unwrap(), 0);
    }

    #[test]
    fn test_insert_variants() {
        let dir = tempdir().unwrap();
        let script = format!("1\n{RYZEN}3\n{INTEL}2\n{RYZEN}2\n0\n");
        let (catalog, output) = run_session(dir.path(), 5, &script);

        assert_eq!(output.matches("Item inserted!").count(), 3);
        assert_eq!(names(&catalog), vec!["Core i5-12400", "Ryzen 5 5600X", "Ryzen 5 5600X"]);
        assert!(catalog.get_at(1).unwrap().integrated_graphics);
    }

    #[test]
    fn test_list_format() {
        let dir = tempdir().unwrap();
        let script = format!("4\n1\n{RYZEN}4\n0\n");
        let (_, output) = run_session(dir.path(), 5, &script);

        assert!(output.contains("List is empty\n"));
        assert!(output.contains(
            "\nModel 1: Ryzen 5 5600X\n  Cores: 6\n  Threads: 12\n  Lithography: 7 nm\n  \
             Base clock: 3.70 GHz\n  Boost clock: 4.60 GHz\n  TDP: 65W\n  \
             Integrated graphics: n\n- - - - - - - - - - - - - - -\n"
        ));
    }

    #[test]
    fn test_remove_update_search_count() {
        let dir = tempdir().unwrap();
        let script = format!("1\n{RYZEN}1\n{INTEL}6\n{RYZEN}2\n5\n1\n7\n1\n8\n0\n");
        let (catalog, output) = run_session(dir.path(), 5, &script);

        assert!(output.contains("Item updated!"));
        assert!(output.contains("Item removed!"));
        assert!(output.contains("Model 1: Ryzen 5 5600X"));
        assert!(output.contains("Registered items: 1"));
        assert_eq!(names(&catalog), vec!["Ryzen 5 5600X"]);
    }

    #[test]
    fn test_errors_are_reported_and_loop_continues() {
        let dir = tempdir().unwrap();
        let script = format!("1\n{RYZEN}1\n{RYZEN}5\n9\n7\n3\n2\n{INTEL}1\n42\nabc\n8\n0\n");
        let (catalog, output) = run_session(dir.path(), 1, &script);

        assert!(output.contains("store error: store is full (1 records)"));
        assert!(output.contains("store error: invalid position 9: expected 1..=1"));
        assert!(output.contains("store error: invalid position 3: expected 1..=1"));
        assert_eq!(output.matches("Invalid option").count(), 2);
        assert!(output.contains("Registered items: 1"));
        assert_eq!(catalog.len().unwrap(), 1);
    }

    #[test]
    fn test_negative_position_is_invalid() {
        let dir = tempdir().unwrap();
        let script = format!("1\n{RYZEN}5\n-1\n7\n-3\n2\n{INTEL}-2\n8\n0\n");
        let (catalog, output) = run_session(dir.path(), 5, &script);

        assert_eq!(
            output.matches("store error: invalid position 0: expected 1..=1").count(),
            3
        );
        assert!(!output.contains("Invalid value '-"));
        assert!(output.contains("Registered items: 1"));
        assert_eq!(catalog.len().unwrap(), 1);
    }

    #[test]
    fn test_invalid_field_input_reprompts() {
        let dir = tempdir().unwrap();
        let script = "1\n\nRyzen 5 5600X\nsix\n6\n12\n7\nfast\n3.7\n4.6\n65\nmaybe\nn\n0\n";
        let (catalog, output) = run_session(dir.path(), 5, script);

        assert!(output.contains("Invalid value 'six', try again."));
        assert!(output.contains("Invalid value 'fast', try again."));
        assert!(output.contains("invalid integrated graphics flag 'maybe'"));
        assert_eq!(catalog.get_at(1).unwrap().cores, 6);
    }

    #[test]
    fn test_rejected_record_is_reported() {
        let dir = tempdir().unwrap();
        let script = "1\nA model name that is too long\n6\n12\n7\n3.7\n4.6\n65\nn\n0\n";
        let (catalog, output) = run_session(dir.path(), 5, script);

        assert!(output.contains("record error: model name"));
        assert_eq!(catalog.len().unwrap(), 0);
    }

    #[test]
    fn test_destroy_then_use() {
        let dir = tempdir().unwrap();
        let script = format!("9\n9\n4\n8\n1\n{RYZEN}0\n");
        let (catalog, output) = run_session(dir.path(), 5, &script);

        assert!(output.contains("List deleted!"));
        assert_eq!(output.matches("store error: store is not initialized").count(), 4);
        assert!(!catalog.is_initialized());
    }

    #[test]
    fn test_save_load_restore() {
        let dir = tempdir().unwrap();
        let script = format!("10\n1\n{RYZEN}1\n{INTEL}11\n10\n0\n");
        let (_, output) = run_session(dir.path(), 5, &script);

        assert!(output.contains("dump error: failed to read dump"));
        assert!(output.contains("Saved 2 item(s) to"));
        assert!(output.contains("Model 2: Core i5-12400\n  Cores: 6"));
        assert!(output.contains("  Base clock: 2.50\n"));

        // A second session over the same file restores both records
        let (catalog, output) = run_session(dir.path(), 5, "12\n0\n");
        assert!(output.contains("Restored 2 item(s)"));
        assert_eq!(names(&catalog), vec!["Ryzen 5 5600X", "Core i5-12400"]);
    }
}

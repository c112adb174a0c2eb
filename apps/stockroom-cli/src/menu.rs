//! # Menu
//!
//! The interactive text loop. Reads from any `BufRead`, writes to any
//! `Write`, and calls into the store for every action.
//!
//! ## Menu Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. List all products     ──► Store::list_active → describe()          │
//! │  2. Show total amount     ──► Store::total_active_quantity             │
//! │  3. Make an order         ──► name ─► find_exact ──hit──► quantity     │
//! │                                   │                          │         │
//! │                                   └─miss─► find_partial      │         │
//! │                                           (display only)     ▼         │
//! │                               'done' ──► Store::checkout(basket)       │
//! │  4. Quit (or end of input)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use stockroom_core::{BasketLine, Store};
use tracing::debug;

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive menu bound to one store and one input/output pair.
pub struct Menu<'a, R, W> {
    store: &'a mut Store,
    store_name: String,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut Store, store_name: impl Into<String>, input: R, output: W) -> Self {
        Menu {
            store,
            store_name: store_name.into(),
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\nWelcome to {}!", self.store_name)?;
            writeln!(self.output, "1. List all products in store")?;
            writeln!(self.output, "2. Show total amount in store")?;
            writeln!(self.output, "3. Make an order")?;
            writeln!(self.output, "4. Quit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return self.quit();
            };
            debug!(choice = %choice, "Menu selection");

            let flow = match choice.parse::<u32>() {
                Ok(1) => self.list_products()?,
                Ok(2) => self.show_total_amount()?,
                Ok(3) => self.make_order()?,
                Ok(4) => Flow::Quit,
                Ok(_) => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please select a number between 1 and 4."
                    )?;
                    Flow::Continue
                }
                Err(_) => {
                    writeln!(
                        self.output,
                        "Invalid input. Please enter a number between 1 and 4."
                    )?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                return self.quit();
            }
        }
    }

    /// Writes `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn list_products(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\nAvailable Products:")?;
        for (index, product) in self.store.list_active().iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, product.describe())?;
        }
        Ok(Flow::Continue)
    }

    fn show_total_amount(&mut self) -> io::Result<Flow> {
        match self.store.total_active_quantity() {
            Ok(total) => writeln!(
                self.output,
                "\nTotal quantity of items in the store: {}",
                total
            )?,
            Err(err) => writeln!(self.output, "\nCannot compute total quantity: {}", err)?,
        }
        Ok(Flow::Continue)
    }

    fn make_order(&mut self) -> io::Result<Flow> {
        let mut basket: Vec<BasketLine> = Vec::new();

        loop {
            let Some(query) = self.prompt("\nEnter the product name (or 'done' to finish): ")?
            else {
                return Ok(Flow::Quit);
            };
            if query.eq_ignore_ascii_case("done") {
                break;
            }

            let Some((id, name)) = self
                .store
                .find_exact(&query)
                .map(|p| (p.id(), p.name().to_string()))
            else {
                self.show_partial_matches(&query)?;
                writeln!(self.output, "Product '{}' not found. Please try again.", query)?;
                continue;
            };

            let Some(quantity) = self.prompt(&format!("Enter quantity for {}: ", name))? else {
                return Ok(Flow::Quit);
            };
            match quantity.parse::<i64>() {
                Ok(quantity) => basket.push((id, quantity)),
                Err(_) => {
                    writeln!(self.output, "Invalid quantity. Please enter a valid number.")?;
                }
            }
        }

        if basket.is_empty() {
            writeln!(self.output, "\nNo items ordered.")?;
            return Ok(Flow::Continue);
        }

        match self.store.checkout(&basket) {
            Ok(total) => writeln!(
                self.output,
                "\nOrder placed successfully! Total cost: {}",
                total
            )?,
            Err(err) => writeln!(self.output, "\nOrder failed: {}", err)?,
        }
        Ok(Flow::Continue)
    }

    fn show_partial_matches(&mut self, query: &str) -> io::Result<()> {
        let matches = self.store.find_partial(query);
        if matches.is_empty() {
            return writeln!(
                self.output,
                "No products found for the search query '{}'.",
                query
            );
        }

        writeln!(self.output, "\nProducts matching your search '{}':", query)?;
        for product in matches {
            writeln!(self.output, "{}", product.describe())?;
        }
        Ok(())
    }

    fn quit(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\nThank you for visiting {}! Goodbye!",
            self.store_name
        )?;
        self.output.flush()
    }
}

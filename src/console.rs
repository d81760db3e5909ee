// 🖥️ Console Driver - line-oriented menu over the catalog
//
// Owns all prompting and number parsing. The catalog only ever receives
// already-typed values. End of input ends the session like choosing Exit.

use crate::catalog::Catalog;
use crate::item::{render_header, Item, ItemFactory};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::debug;

const RULE: &str =
    "─────────────────────────────────────────────────────────────────────────";

#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

pub struct Console<R, W> {
    input: R,
    output: W,
    grid_columns: NonZeroUsize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, grid_columns: NonZeroUsize) -> Self {
        Console {
            input,
            output,
            grid_columns,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run the menu loop until the operator exits or input runs out.
    pub fn run(&mut self, catalog: &mut Catalog, factory: &mut ItemFactory) -> Result<()> {
        match self.session(catalog, factory) {
            Err(err) if err.is::<InputClosed>() => {
                debug!("input closed, leaving menu");
                Ok(())
            }
            other => other,
        }
    }

    fn session(&mut self, catalog: &mut Catalog, factory: &mut ItemFactory) -> Result<()> {
        writeln!(self.output, "╔═══════════════════════════════════════════════════════╗")?;
        writeln!(self.output, "║   PRODUCT INVENTORY MANAGEMENT SYSTEM                 ║")?;
        writeln!(self.output, "╚═══════════════════════════════════════════════════════╝")?;

        loop {
            self.show_menu()?;
            let choice = self.read_int("Enter your choice: ")?;
            debug!(choice, "menu choice");

            match choice {
                1 => self.add_product(catalog, factory)?,
                2 => self.remove_product(catalog)?,
                3 => self.show_all(catalog)?,
                4 => self.sort_products(catalog)?,
                5 => self.update_quantity(catalog)?,
                6 => self.search(catalog)?,
                7 => self.export(catalog)?,
                8 => self.show_statistics(catalog, factory)?,
                9 => self.show_log(catalog)?,
                10 => self.show_grid(catalog)?,
                11 => self.clear_all(catalog)?,
                #[cfg(feature = "tui")]
                12 => crate::ui::run_ui(catalog)?,
                0 => {
                    writeln!(self.output, "Exiting... Thank you!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice! Please try again.")?,
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "╔════════════════════════════════════════╗")?;
        writeln!(self.output, "║            MAIN MENU                   ║")?;
        writeln!(self.output, "╚════════════════════════════════════════╝")?;
        writeln!(self.output, "1. Add Product")?;
        writeln!(self.output, "2. Remove Product")?;
        writeln!(self.output, "3. Show All Products")?;
        writeln!(self.output, "4. Sort Products")?;
        writeln!(self.output, "5. Update Quantity")?;
        writeln!(self.output, "6. Search Product")?;
        writeln!(self.output, "7. Export to CSV")?;
        writeln!(self.output, "8. Show Statistics")?;
        writeln!(self.output, "9. Show Transaction Log")?;
        writeln!(self.output, "10. Show Grid View")?;
        writeln!(self.output, "11. Clear All Products")?;
        #[cfg(feature = "tui")]
        writeln!(self.output, "12. Browse Products (table view)")?;
        writeln!(self.output, "0. Exit")?;
        writeln!(self.output, "────────────────────────────────────────")?;
        Ok(())
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    /// Print `prompt` and read one line without its line ending.
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }

        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Prompt until the answer parses as an integer.
    fn read_int(&mut self, prompt: &str) -> Result<i32> {
        loop {
            match self.read_line(prompt)?.trim().parse::<i32>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    /// Prompt until the answer parses as a decimal number.
    fn read_float(&mut self, prompt: &str) -> Result<f64> {
        loop {
            match self.read_line(prompt)?.trim().parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    /// "true" in any case means yes; anything else means no.
    fn read_bool(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.read_line(prompt)?.trim().eq_ignore_ascii_case("true"))
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn add_product(&mut self, catalog: &mut Catalog, factory: &mut ItemFactory) -> Result<()> {
        writeln!(self.output, "\n=== Add Product ===")?;
        writeln!(self.output, "1. General Product")?;
        writeln!(self.output, "2. Electronics")?;
        writeln!(self.output, "3. Grocery")?;

        let kind = self.read_int("Select type: ")?;
        let name = self.read_line("Enter product name: ")?;
        let price = self.read_float("Enter price: ")?;
        let quantity = self.read_int("Enter quantity: ")?;

        let item = match kind {
            1 => {
                let weight = self.read_float("Enter weight: ")?;
                let unit = self.read_line("Enter unit (kg/g/L/ml/pcs): ")?;
                factory.general(name, price, quantity, weight, unit)
            }
            2 => {
                let warranty = self.read_int("Enter warranty (months): ")?;
                let brand = self.read_line("Enter brand: ")?;
                factory.electronics(name, price, quantity, warranty, brand)
            }
            3 => {
                let weight = self.read_float("Enter weight: ")?;
                let unit = self.read_line("Enter unit: ")?;
                let perishable = self.read_bool("Is perishable? (true/false): ")?;
                factory.grocery(name, price, quantity, weight, unit, perishable)
            }
            _ => {
                writeln!(self.output, "Invalid type!")?;
                return Ok(());
            }
        };

        let id = item.id();
        catalog.add(item);
        writeln!(self.output, "Product added successfully! ID: {}", id)?;
        Ok(())
    }

    fn remove_product(&mut self, catalog: &mut Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Remove Product ===")?;
        let id = self.read_int("Enter product ID to remove: ")?;

        if catalog.remove(id) {
            writeln!(self.output, "Product removed successfully!")?;
        } else {
            writeln!(self.output, "Product not found!")?;
        }
        Ok(())
    }

    fn show_all(&mut self, catalog: &Catalog) -> Result<()> {
        writeln!(self.output, "\n=== All Products ===")?;
        if catalog.is_empty() {
            writeln!(self.output, "No products available.")?;
            return Ok(());
        }

        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "{}", render_header())?;
        writeln!(self.output, "{}", RULE)?;
        self.write_rows(catalog.items().iter())?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "Total Products: {}", catalog.len())?;
        Ok(())
    }

    fn write_rows<'a>(&mut self, items: impl Iterator<Item = &'a Item>) -> Result<()> {
        for item in items {
            writeln!(self.output, "{}", item)?;
        }
        Ok(())
    }

    fn sort_products(&mut self, catalog: &mut Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Sort Products ===")?;
        writeln!(self.output, "1. Sort by Name")?;
        writeln!(self.output, "2. Sort by Price")?;
        writeln!(self.output, "3. Sort by Quantity")?;

        match self.read_int("Select sorting option: ")? {
            1 => {
                catalog.sort_by_name();
                writeln!(self.output, "Sorted by name!")?;
            }
            2 => {
                catalog.sort_by_price();
                writeln!(self.output, "Sorted by price!")?;
            }
            3 => {
                catalog.sort_by_quantity();
                writeln!(self.output, "Sorted by quantity!")?;
            }
            _ => writeln!(self.output, "Invalid option!")?,
        }
        Ok(())
    }

    fn update_quantity(&mut self, catalog: &mut Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Update Quantity ===")?;
        let id = self.read_int("Enter product ID: ")?;

        let Some(current) = catalog.find_by_id(id).map(Item::quantity) else {
            writeln!(self.output, "Product not found!")?;
            return Ok(());
        };

        writeln!(self.output, "Current quantity: {}", current)?;
        let quantity = self.read_int("Enter new quantity: ")?;
        if let Some(item) = catalog.find_by_id_mut(id) {
            item.set_quantity(quantity);
        }
        writeln!(self.output, "Quantity updated successfully!")?;
        Ok(())
    }

    fn search(&mut self, catalog: &Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Search Product ===")?;
        let keyword = self.read_line("Enter search keyword: ")?;

        let results = catalog.search_by_name(&keyword);
        if results.is_empty() {
            writeln!(self.output, "No products found!")?;
        } else {
            writeln!(self.output, "Found {} product(s):", results.len())?;
            self.write_rows(results.into_iter())?;
        }
        Ok(())
    }

    fn export(&mut self, catalog: &mut Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Export to CSV ===")?;
        let filename = self.read_line("Enter filename (e.g., inventory.csv): ")?;

        match catalog.export(&filename) {
            Ok(()) => writeln!(self.output, "Exported successfully to {}", filename)?,
            Err(err) => writeln!(self.output, "Error exporting: {}", err)?,
        }
        Ok(())
    }

    fn show_statistics(&mut self, catalog: &Catalog, factory: &ItemFactory) -> Result<()> {
        writeln!(self.output, "\n{}", catalog.statistics())?;
        writeln!(self.output, "Total Product Types: {}", factory.constructed())?;
        Ok(())
    }

    fn show_log(&mut self, catalog: &Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Transaction Log ===")?;
        for (index, entry) in catalog.log().iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, entry)?;
        }
        Ok(())
    }

    fn show_grid(&mut self, catalog: &Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Grid View ===")?;
        if catalog.is_empty() {
            writeln!(self.output, "No products available.")?;
            return Ok(());
        }

        for row in catalog.grid(self.grid_columns) {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(item) => format!("{:<24}", format!("#{} {}", item.id(), item.name())),
                    None => format!("{:<24}", "-"),
                })
                .collect();
            writeln!(self.output, "{}", cells.join(" | ").trim_end())?;
        }
        Ok(())
    }

    fn clear_all(&mut self, catalog: &mut Catalog) -> Result<()> {
        writeln!(self.output, "\n=== Clear All Products ===")?;
        let answer = self.read_line("This cannot be undone. Type 'yes' to confirm: ")?;

        if answer.trim().eq_ignore_ascii_case("yes") {
            catalog.clear();
            writeln!(self.output, "All products cleared.")?;
        } else {
            writeln!(self.output, "Nothing cleared.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run_script(script: &str) -> (Catalog, ItemFactory, String) {
        let mut catalog = Catalog::new();
        let mut factory = ItemFactory::new();
        let columns = NonZeroUsize::new(2).unwrap();
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new(), columns);

        console.run(&mut catalog, &mut factory).unwrap();

        let output = String::from_utf8(console.output().clone()).unwrap();
        (catalog, factory, output)
    }

    #[test]
    fn test_exit_choice() {
        let (catalog, _, output) = run_script("0\n");

        assert!(catalog.is_empty());
        assert!(output.contains("MAIN MENU"));
        assert!(output.ends_with("Exiting... Thank you!\n"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (_, _, output) = run_script("3\n");

        assert!(output.contains("No products available."));
        assert!(!output.contains("Exiting"));
    }

    #[test]
    fn test_add_each_kind() {
        let script = "1\n1\nRice\n60\n10\n5\nkg\n\
                      1\n2\nPhone\n1999.5\n3\n12\nAcme\n\
                      1\n3\nMilk\n30\n20\n1\nL\nTRUE\n\
                      0\n";
        let (catalog, factory, output) = run_script(script);

        assert_eq!(catalog.len(), 3);
        assert_eq!(factory.constructed(), 3);
        assert!(output.contains("Product added successfully! ID: 1"));
        assert!(output.contains("Product added successfully! ID: 3"));

        let categories: Vec<&str> = catalog.items().iter().map(|i| i.category()).collect();
        assert_eq!(categories, vec!["General", "Electronics", "Grocery"]);
        assert!(catalog.items()[2].render().ends_with("| Perishable"));
    }

    #[test]
    fn test_invalid_type_consumes_no_id() {
        let script = "1\n9\nGhost\n1\n1\n\
                      1\n1\nPen\n1\n1\n0\npcs\n\
                      0\n";
        let (catalog, factory, output) = run_script(script);

        assert!(output.contains("Invalid type!"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].id(), 1);
        assert_eq!(factory.constructed(), 1);
    }

    #[test]
    fn test_number_prompts_retry() {
        let script = "abc\n1\n1\nPen\nfree\n2.5\nmany\n4\n0\npcs\n0\n";
        let (catalog, _, output) = run_script(script);

        assert_eq!(output.matches("Please enter a valid number.").count(), 3);
        assert_eq!(catalog.items()[0].price(), 2.5);
        assert_eq!(catalog.items()[0].quantity(), 4);
    }

    #[test]
    fn test_remove_and_update() {
        let script = "1\n1\nPen\n1\n1\n0\npcs\n\
                      5\n1\n42\n\
                      5\n7\n\
                      2\n7\n\
                      2\n1\n\
                      0\n";
        let (catalog, _, output) = run_script(script);

        assert!(output.contains("Current quantity: 1"));
        assert!(output.contains("Quantity updated successfully!"));
        assert_eq!(output.matches("Product not found!").count(), 2);
        assert!(output.contains("Product removed successfully!"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_sort_search_and_log() {
        let script = "1\n1\nRed Velvet Cake\n10\n1\n0\npcs\n\
                      1\n1\nBlue Velvet Sofa\n5\n1\n0\npcs\n\
                      4\n2\n\
                      6\nvel\n\
                      6\nedvet\n\
                      9\n\
                      0\n";
        let (catalog, _, output) = run_script(script);

        assert_eq!(catalog.items()[0].name(), "Blue Velvet Sofa");
        assert!(output.contains("Sorted by price!"));
        assert!(output.contains("Found 2 product(s):"));
        assert!(output.contains("No products found!"));
        assert!(output.contains("1. Added: Red Velvet Cake"));
        assert!(output.contains("3. Sorted by price"));
    }

    #[test]
    fn test_statistics_and_counter() {
        let script = "1\n1\nA\n2\n3\n0\npcs\n\
                      2\n1\n\
                      8\n\
                      0\n";
        let (_, _, output) = run_script(script);

        assert!(output.contains("Total Products: 0"));
        assert!(output.contains("Total Value: ₹0.00"));
        assert!(output.contains("Total Product Types: 1"));
    }

    #[test]
    fn test_show_all_table() {
        let script = "1\n1\nRice\n60\n10\n5\nkg\n3\n0\n";
        let (_, _, output) = run_script(script);

        assert!(output.contains(&render_header()));
        assert!(output.contains("1     | Rice"));
        assert!(output.contains("Total Products: 1"));
    }

    #[test]
    fn test_grid_view() {
        let script = "1\n1\nA\n1\n1\n0\npcs\n\
                      1\n1\nB\n1\n1\n0\npcs\n\
                      1\n1\nC\n1\n1\n0\npcs\n\
                      10\n0\n";
        let (_, _, output) = run_script(script);

        assert!(output.contains("#1 A"));
        assert!(output.lines().any(|line| line.starts_with("#3 C") && line.ends_with("| -")));
    }

    #[test]
    fn test_export_success_and_failure() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("out.csv");
        let bad = dir.path().join("missing").join("out.csv");
        let script = format!(
            "1\n1\nPen\n1\n1\n0\npcs\n7\n{}\n7\n{}\n0\n",
            good.display(),
            bad.display()
        );
        let (catalog, _, output) = run_script(&script);

        assert!(good.exists());
        assert!(output.contains(&format!("Exported successfully to {}", good.display())));
        assert!(output.contains("Error exporting: cannot write"));
        assert_eq!(
            catalog.log().iter().filter(|e| e.starts_with("Exported to CSV")).count(),
            1
        );
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let script = "1\n1\nPen\n1\n1\n0\npcs\n11\nno\n11\nyes\n0\n";
        let (catalog, _, output) = run_script(script);

        assert!(output.contains("Nothing cleared."));
        assert!(output.contains("All products cleared."));
        assert!(catalog.is_empty());
        assert_eq!(catalog.log().last().unwrap(), "Cleared all products");
    }

    #[test]
    fn test_invalid_menu_choice() {
        let (_, _, output) = run_script("99\n0\n");
        assert!(output.contains("Invalid choice! Please try again."));
    }
}

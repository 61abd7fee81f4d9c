//! Interactive catalog menu.
//!
//! # Responsibility
//! - Drive the main menu and its sub-menus over a [`Console`].
//! - Turn prompt input into catalog service calls.
//! - Persist settings and catalog on exit when enabled.
//!
//! # Invariants
//! - End of input behaves like choosing Quit.
//! - While editing, blank input keeps the current value and `-` clears
//!   optional fields.
//! - Invalid values are reported and asked again; nothing is half-applied.

use crate::console::Console;
use crate::input::{
    parse_copies, parse_count, parse_id, parse_kind, parse_optional_date, parse_optional_year,
    parse_price, parse_text, parse_title, parse_yes_no, InputResult,
};
use crate::render::{render_item, render_items};
use biblio_core::{
    core_version, BookDetails, CatalogService, ComicBookDetails, FieldFilter,
    InMemoryItemRepository, Item, ItemDetails, ItemKind, ItemQuery, PeriodicalDetails,
    ServiceError, Settings,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub type Catalog = CatalogService<InMemoryItemRepository>;

const APP_NAME: &str = "Biblio";
const CLEAR_TOKEN: &str = "-";

/// Prompt metadata for one editable field.
struct FieldPrompt<'a> {
    label: &'a str,
    /// Current value as displayed; empty hides the `[...]` hint.
    shown: String,
    /// Whether `-` resets the field to its default.
    clearable: bool,
}

impl<'a> FieldPrompt<'a> {
    fn new(label: &'a str, shown: impl Into<String>) -> Self {
        Self {
            label,
            shown: shown.into(),
            clearable: false,
        }
    }

    fn clearable(mut self) -> Self {
        self.clearable = true;
        self
    }

    fn text(&self) -> String {
        if self.shown.is_empty() {
            format!("{}: ", self.label)
        } else {
            format!("{} [{}]: ", self.label, self.shown)
        }
    }
}

pub struct Menu<R, W> {
    console: Console<R, W>,
    catalog: Catalog,
    settings: Settings,
    settings_path: PathBuf,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(
        console: Console<R, W>,
        catalog: Catalog,
        settings: Settings,
        settings_path: PathBuf,
    ) -> Self {
        Self {
            console,
            catalog,
            settings,
            settings_path,
        }
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[cfg(test)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[cfg(test)]
    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs the main menu until Quit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!(
            "event=menu_start module=cli status=ok items={}",
            self.catalog.list_items().len()
        );

        loop {
            self.print_main_menu()?;
            let Some(choice) = self.console.ask("> ")? else {
                return self.quit();
            };

            match choice.trim() {
                "1" => self.list_all()?,
                "2" => self.search_menu()?,
                "3" => self.add_item()?,
                "4" => self.edit_item()?,
                "5" => self.delete_item()?,
                "6" => self.settings_menu()?,
                "7" => self.show_info()?,
                "0" | "q" => return self.quit(),
                "" => {}
                _ => self.console.say("[!] Unknown command\n")?,
            }
        }
    }

    fn print_main_menu(&mut self) -> io::Result<()> {
        self.console
            .say(&format!("=== {APP_NAME} v{} ===", env!("CARGO_PKG_VERSION")))?;
        self.console.say("1. List items")?;
        self.console.say("2. Search items")?;
        self.console.say("3. Add an item")?;
        self.console.say("4. Edit an item")?;
        self.console.say("5. Delete an item")?;
        self.console.say("6. Settings")?;
        self.console.say("7. About")?;
        self.console.say("0. Quit")
    }

    fn list_all(&mut self) -> io::Result<()> {
        self.console.say("=== Items ===")?;
        let listing = render_items(self.catalog.list_items());
        self.console.say(&listing)?;
        self.console.pause()
    }

    fn search_menu(&mut self) -> io::Result<()> {
        self.console.say("=== Search items ===")?;
        self.console.say("1. All items")?;
        self.console.say("2. By type")?;
        self.console.say("3. By illustrator")?;
        self.console
            .say("4. Free query (field:value, % any run, _ one character)")?;
        self.console.say("0. Back")?;

        let Some(choice) = self.console.ask("> ")? else {
            return Ok(());
        };
        let listing = match choice.trim() {
            "1" => render_items(self.catalog.list_items()),
            "2" => {
                self.console.say("Types: 1. book  2. comic book  3. periodical")?;
                let Some(kind) = self.prompt("Type", parse_kind)? else {
                    return Ok(());
                };
                let Some(query) = self.console.ask("Query (blank for all): ")? else {
                    return Ok(());
                };
                match self.catalog.search_kind(kind, &query) {
                    Ok(items) => render_items(items),
                    Err(err) => format!("[!] {err}\n"),
                }
            }
            "3" => {
                let Some(name) = self.prompt("Illustrator", parse_text)? else {
                    return Ok(());
                };
                self.illustrator_listing(&name)
            }
            "4" => {
                let Some(query) = self.console.ask("Query: ")? else {
                    return Ok(());
                };
                match self.catalog.search(&query) {
                    Ok(items) => render_items(items),
                    Err(err) => format!("[!] {err}\n"),
                }
            }
            _ => return Ok(()),
        };

        self.console.say(&listing)?;
        self.console.pause()
    }

    fn illustrator_listing(&self, name: &str) -> String {
        if name.is_empty() {
            return render_items(self.catalog.items_of_kind(ItemKind::ComicBook));
        }
        match FieldFilter::new("illustrator", name) {
            Ok(filter) => {
                let query = ItemQuery::default().with_filter(filter);
                render_items(self.catalog.find(&query))
            }
            Err(err) => format!("[!] {err}\n"),
        }
    }

    fn add_item(&mut self) -> io::Result<()> {
        self.console.say("=== Add an item ===")?;
        self.console.say("Types: 1. book  2. comic book  3. periodical")?;

        let Some(kind) = self.prompt("Type", parse_kind)? else {
            return Ok(());
        };
        let Some(title) = self.prompt("Title", parse_title)? else {
            return Ok(());
        };
        let Some(available_count) = self.prompt("Available copies", parse_count)? else {
            return Ok(());
        };
        let Some(price) = self.prompt("Price", parse_price)? else {
            return Ok(());
        };
        let Some(details) = self.edit_details(ItemDetails::empty(kind))? else {
            return Ok(());
        };

        match self
            .catalog
            .add_item(Item::new(title, available_count, price, details))
        {
            Ok(id) => self.console.say(&format!("[OK] Item #{id} added."))?,
            Err(err) => self.report(err)?,
        }
        self.console.pause()
    }

    fn edit_item(&mut self) -> io::Result<()> {
        self.console.say("=== Edit an item ===")?;
        let Some(current) = self.pick_item()? else {
            return Ok(());
        };
        self.console.say(&render_item(&current))?;
        self.console
            .say("Leave blank to keep a value, `-` clears optional fields.")?;

        let Item {
            id,
            title,
            available_count,
            price,
            details,
        } = current;

        let prompt = FieldPrompt::new("Title", title.clone());
        let Some(title) = self.edit_field(prompt, title, parse_title)? else {
            return Ok(());
        };
        let prompt = FieldPrompt::new("Available copies", available_count.to_string());
        let Some(available_count) = self.edit_field(prompt, available_count, parse_count)? else {
            return Ok(());
        };
        let prompt = FieldPrompt::new("Price", price.to_string());
        let Some(price) = self.edit_field(prompt, price, parse_price)? else {
            return Ok(());
        };
        let Some(details) = self.edit_details(details)? else {
            return Ok(());
        };

        let edited = Item {
            id,
            title,
            available_count,
            price,
            details,
        };
        match self.catalog.update_item(edited) {
            Ok(()) => self.console.say(&format!("[OK] Item #{id} updated."))?,
            Err(err) => self.report(err)?,
        }
        self.console.pause()
    }

    fn delete_item(&mut self) -> io::Result<()> {
        self.console.say("=== Delete an item ===")?;
        let Some(current) = self.pick_item()? else {
            return Ok(());
        };
        self.console.say(&render_item(&current))?;

        let Some(confirmed) = self.prompt("Delete this item? [y/N]", parse_yes_no)? else {
            return Ok(());
        };
        if !confirmed {
            self.console.say("Nothing deleted.")?;
            return self.console.pause();
        }

        match self.catalog.remove_item(current.id) {
            Ok(Some(_)) => self
                .console
                .say(&format!("[OK] Item #{} deleted.", current.id))?,
            Ok(None) => self
                .console
                .say(&format!("[!] No item #{}", current.id))?,
            Err(err) => self.report(err)?,
        }
        self.console.pause()
    }

    /// Asks for an id and returns a copy of that item.
    fn pick_item(&mut self) -> io::Result<Option<Item>> {
        let Some(id) = self.prompt("Item id", parse_id)? else {
            return Ok(None);
        };
        match self.catalog.get_item(id).cloned() {
            Some(item) => Ok(Some(item)),
            None => {
                self.console.say(&format!("[!] No item #{id}"))?;
                self.console.pause()?;
                Ok(None)
            }
        }
    }

    fn edit_details(&mut self, details: ItemDetails) -> io::Result<Option<ItemDetails>> {
        let edited = match details {
            ItemDetails::Book(book) => self.edit_book(book)?.map(ItemDetails::Book),
            ItemDetails::ComicBook(ComicBookDetails { book, illustrator }) => {
                let Some(book) = self.edit_book(book)? else {
                    return Ok(None);
                };
                let prompt = FieldPrompt::new("Illustrator", illustrator.clone()).clearable();
                self.edit_field(prompt, illustrator, parse_text)?
                    .map(|illustrator| ItemDetails::ComicBook(ComicBookDetails { book, illustrator }))
            }
            ItemDetails::Periodical(periodical) => {
                self.edit_periodical(periodical)?.map(ItemDetails::Periodical)
            }
        };
        Ok(edited)
    }

    fn edit_book(&mut self, book: BookDetails) -> io::Result<Option<BookDetails>> {
        let BookDetails {
            copies,
            year,
            publisher,
            author,
        } = book;

        let prompt = FieldPrompt::new("Author", author.clone()).clearable();
        let Some(author) = self.edit_field(prompt, author, parse_text)? else {
            return Ok(None);
        };
        let prompt = FieldPrompt::new("Publisher", publisher.clone()).clearable();
        let Some(publisher) = self.edit_field(prompt, publisher, parse_text)? else {
            return Ok(None);
        };
        let shown = year.map(|year| year.to_string()).unwrap_or_default();
        let prompt = FieldPrompt::new("Year", shown).clearable();
        let Some(year) = self.edit_field(prompt, year, parse_optional_year)? else {
            return Ok(None);
        };
        let prompt = FieldPrompt::new("Copies (comma-separated)", copies.join(", ")).clearable();
        let Some(copies) = self.edit_field(prompt, copies, parse_copies)? else {
            return Ok(None);
        };

        Ok(Some(BookDetails {
            copies,
            year,
            publisher,
            author,
        }))
    }

    fn edit_periodical(
        &mut self,
        periodical: PeriodicalDetails,
    ) -> io::Result<Option<PeriodicalDetails>> {
        let PeriodicalDetails {
            publication_date,
            frequency,
        } = periodical;

        let shown = publication_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let prompt = FieldPrompt::new("Publication date (yyyy-mm-dd)", shown).clearable();
        let Some(publication_date) =
            self.edit_field(prompt, publication_date, parse_optional_date)?
        else {
            return Ok(None);
        };
        let prompt = FieldPrompt::new("Frequency", frequency.clone()).clearable();
        let Some(frequency) = self.edit_field(prompt, frequency, parse_text)? else {
            return Ok(None);
        };

        Ok(Some(PeriodicalDetails {
            publication_date,
            frequency,
        }))
    }

    fn settings_menu(&mut self) -> io::Result<()> {
        loop {
            self.console.say("=== Settings ===")?;
            self.console.say(&format!(
                "1. Save on exit: {}",
                on_off(self.settings.save_on_exit)
            ))?;
            self.console.say(&format!(
                "2. Load on startup: {}",
                on_off(self.settings.load_on_startup)
            ))?;
            self.console.say("3. Save now")?;
            self.console.say("0. Back")?;

            let Some(choice) = self.console.ask("> ")? else {
                return Ok(());
            };
            match choice.trim() {
                "1" => {
                    self.settings.save_on_exit = !self.settings.save_on_exit;
                    self.save_settings()?;
                }
                "2" => {
                    self.settings.load_on_startup = !self.settings.load_on_startup;
                    self.save_settings()?;
                }
                "3" => {
                    self.save_settings()?;
                    self.save_catalog()?;
                }
                "0" | "" => return Ok(()),
                _ => self.console.say("[!] Unknown command\n")?,
            }
        }
    }

    fn show_info(&mut self) -> io::Result<()> {
        let stores = self.catalog.store_names().join(" -> ");
        let loaded_from = self.catalog.loaded_from().unwrap_or("none").to_string();

        self.console.say("=== About ===")?;
        self.console.say(&format!("Application: {APP_NAME}"))?;
        self.console.say(&format!(
            "Version: {} (core {})",
            env!("CARGO_PKG_VERSION"),
            core_version()
        ))?;
        self.console.say(&format!("Stores: {stores}"))?;
        self.console.say(&format!("Loaded from: {loaded_from}"))?;
        self.console
            .say(&format!("Items: {}", self.catalog.list_items().len()))?;
        self.console.say(&format!(
            "Settings file: {}",
            self.settings_path.display()
        ))?;
        self.console.say("")?;
        self.console.pause()
    }

    fn quit(&mut self) -> io::Result<()> {
        self.console.say("=== Closing ===")?;
        if self.settings.save_on_exit {
            self.save_settings()?;
            self.save_catalog()?;
        }
        info!(
            "event=menu_exit module=cli status=ok save_on_exit={}",
            self.settings.save_on_exit
        );
        self.console.say("Goodbye!")
    }

    fn save_settings(&mut self) -> io::Result<()> {
        match self.settings.save(&self.settings_path) {
            Ok(()) => self.console.say(&format!(
                "[OK] Settings saved ({})",
                self.settings_path.display()
            )),
            Err(err) => self
                .console
                .say(&format!("[!] Could not save settings: {err}")),
        }
    }

    fn save_catalog(&mut self) -> io::Result<()> {
        match self.catalog.save_now() {
            Ok(store) => self.console.say(&format!("[OK] Catalog saved ({store})")),
            Err(err) => self.console.say(&format!("[!] Could not save catalog: {err}")),
        }
    }

    fn report(&mut self, err: ServiceError) -> io::Result<()> {
        match err {
            ServiceError::Persistence(err) => self
                .console
                .say(&format!("[!] Change kept in memory but not saved: {err}")),
            ServiceError::Repo(err) => self.console.say(&format!("[!] {err}")),
        }
    }

    /// Asks until `parse` accepts the line. `None` once input is exhausted.
    fn prompt<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> InputResult<T>,
    ) -> io::Result<Option<T>> {
        let text = format!("{label}: ");
        loop {
            let Some(line) = self.console.ask(&text)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => self.console.say(&format!("[!] {err}"))?,
            }
        }
    }

    /// Like [`Menu::prompt`], but blank input keeps `current`.
    fn edit_field<T: Default>(
        &mut self,
        prompt: FieldPrompt<'_>,
        current: T,
        parse: impl Fn(&str) -> InputResult<T>,
    ) -> io::Result<Option<T>> {
        let text = prompt.text();
        loop {
            let Some(line) = self.console.ask(&text)? else {
                return Ok(None);
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(Some(current));
            }
            if prompt.clearable && trimmed == CLEAR_TOKEN {
                return Ok(Some(T::default()));
            }
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => self.console.say(&format!("[!] {err}"))?,
            }
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

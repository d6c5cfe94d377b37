//! Circdesk CLI — interactive text menu over the catalog API.
//!
//! One mode: `circdesk cli` starts a menu-driven session on stdin. The
//! binary is a plain caller of the library surface; it owns a single
//! `Catalog` instance and presents errors to the user, nothing more.

use std::io::{self, BufRead, Write};

use clap::{Arg, Command};
use tracing_subscriber::EnvFilter;

use circdesk::prelude::*;

fn build_cli() -> Command {
    Command::new("circdesk")
        .about("In-memory library circulation catalog")
        .arg(
            Arg::new("mode")
                .help("Operating mode")
                .value_parser(["cli"])
                .required(true),
        )
        .arg(
            Arg::new("borrow-limit")
                .long("borrow-limit")
                .help("Maximum books one member may hold")
                .value_parser(clap::value_parser!(usize)),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = build_cli().get_matches();
    // value_parser restricts mode to "cli" already
    let mut builder = Catalog::builder();
    if let Some(limit) = matches.get_one::<usize>("borrow-limit") {
        builder = builder.borrow_limit(*limit);
    }

    let mut session = Session {
        catalog: builder.build(),
        input: io::stdin().lock(),
    };
    session.run();
}

struct Session<R> {
    catalog: Catalog,
    input: R,
}

impl<R: BufRead> Session<R> {
    fn run(&mut self) {
        println!("\nWelcome to Circdesk!");
        loop {
            print_menu();
            let Some(choice) = self.prompt("Enter your choice (1-14): ") else {
                break;
            };
            match choice.as_str() {
                "1" => self.add_book(),
                "2" => self.update_book(),
                "3" => self.remove_book(),
                "4" => self.add_member(),
                "5" => self.update_member(),
                "6" => self.remove_member(),
                "7" => self.issue_book(),
                "8" => self.return_book(),
                "9" => println!("\n--- All Books ---\n{}", self.catalog.display_books()),
                "10" => println!("\n--- All Members ---\n{}", self.catalog.display_members()),
                "11" => self.search_books(),
                "12" => self.member_history(),
                "13" => self.book_history(),
                "14" => break,
                _ => println!("Invalid choice. Please try again."),
            }
        }
        println!("\nThank you for using Circdesk. Goodbye!");
    }

    /// Read one trimmed line; `None` on end of input.
    fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{message}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn prompt_u64(&mut self, message: &str) -> Option<u64> {
        loop {
            let line = self.prompt(message)?;
            match line.parse() {
                Ok(value) => return Some(value),
                Err(_) => println!("Please enter a number."),
            }
        }
    }

    fn prompt_book_id(&mut self) -> Option<BookId> {
        loop {
            let raw = self.prompt_u64("Book ID: ")?;
            match BookId::new(raw) {
                Ok(id) => return Some(id),
                Err(e) => println!("{e}"),
            }
        }
    }

    fn prompt_member_id(&mut self) -> Option<MemberId> {
        loop {
            let raw = self.prompt_u64("Member ID: ")?;
            match MemberId::new(raw) {
                Ok(id) => return Some(id),
                Err(e) => println!("{e}"),
            }
        }
    }

    fn report(result: Result<()>, success: &str) {
        match result {
            Ok(()) => println!("{success}"),
            Err(e) => println!("{e}"),
        }
    }

    fn add_book(&mut self) {
        println!("\n--- Add New Book ---");
        let Some(id) = self.prompt_u64("Book ID: ") else { return };
        let Some(title) = self.prompt("Title: ") else { return };
        let Some(author) = self.prompt("Author: ") else { return };
        let Some(copies) = self.prompt_u64("Copies: ") else { return };
        let Ok(copies) = u32::try_from(copies) else {
            println!("Copies out of range.");
            return;
        };

        let result =
            Book::new(id, title, author, copies).and_then(|book| self.catalog.add_book(book));
        Self::report(result, "Book added successfully");
    }

    fn update_book(&mut self) {
        println!("\n--- Update Book ---");
        println!("Leave fields blank to keep current values.");
        let Some(id) = self.prompt_book_id() else { return };
        let Some(title) = self.prompt("New Title: ") else { return };
        let Some(author) = self.prompt("New Author: ") else { return };
        let Some(copies) = self.prompt("New Copies: ") else { return };

        let total_copies = match copies.as_str() {
            "" => None,
            raw => match raw.parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    println!("Copies must be a number.");
                    return;
                }
            },
        };
        let update = BookUpdate {
            title: (!title.is_empty()).then_some(title),
            author: (!author.is_empty()).then_some(author),
            total_copies,
        };
        Self::report(self.catalog.update_book(id, update), "Book updated successfully");
    }

    fn remove_book(&mut self) {
        println!("\n--- Remove Book ---");
        let Some(id) = self.prompt_book_id() else { return };
        Self::report(
            self.catalog.remove_book(id).map(|_| ()),
            "Book removed successfully",
        );
    }

    fn add_member(&mut self) {
        println!("\n--- Add New Member ---");
        let Some(id) = self.prompt_u64("Member ID: ") else { return };
        let Some(name) = self.prompt("Name: ") else { return };

        let result =
            Member::new(id, name).and_then(|member| self.catalog.add_member(member));
        Self::report(result, "Member added successfully");
    }

    fn update_member(&mut self) {
        println!("\n--- Update Member ---");
        println!("Leave field blank to keep current value.");
        let Some(id) = self.prompt_member_id() else { return };
        let Some(name) = self.prompt("New Name: ") else { return };
        let update = MemberUpdate {
            name: (!name.is_empty()).then_some(name),
        };
        Self::report(
            self.catalog.update_member(id, update),
            "Member updated successfully",
        );
    }

    fn remove_member(&mut self) {
        println!("\n--- Remove Member ---");
        let Some(id) = self.prompt_member_id() else { return };
        Self::report(
            self.catalog.remove_member(id).map(|_| ()),
            "Member removed successfully",
        );
    }

    fn issue_book(&mut self) {
        println!("\n--- Issue Book ---");
        let Some(member_id) = self.prompt_member_id() else { return };
        let Some(book_id) = self.prompt_book_id() else { return };
        match self.catalog.issue_book(member_id, book_id) {
            Ok(record) => println!("Issued: {record}"),
            Err(e) => println!("{e}"),
        }
    }

    fn return_book(&mut self) {
        println!("\n--- Return Book ---");
        let Some(member_id) = self.prompt_member_id() else { return };
        let Some(book_id) = self.prompt_book_id() else { return };
        match self.catalog.return_book(member_id, book_id) {
            Ok(record) => println!("Returned: {record}"),
            Err(e) => println!("{e}"),
        }
    }

    fn search_books(&mut self) {
        println!("\n--- Search Books ---");
        let Some(query) = self.prompt("Enter title or author keyword: ") else {
            return;
        };
        if query.is_empty() {
            println!("Please enter a search term.");
            return;
        }
        let results = self.catalog.search_books(&query);
        println!("\nSearch Results:");
        if results.is_empty() {
            println!("No matching books found");
        }
        for book in results {
            println!("{book}");
        }
    }

    fn member_history(&mut self) {
        println!("\n--- Member History ---");
        let Some(id) = self.prompt_member_id() else { return };
        match self.catalog.member_history(id) {
            Ok(records) => print_history(&records),
            Err(e) => println!("{e}"),
        }
    }

    fn book_history(&mut self) {
        println!("\n--- Book History ---");
        let Some(id) = self.prompt_book_id() else { return };
        match self.catalog.book_history(id) {
            Ok(records) => print_history(&records),
            Err(e) => println!("{e}"),
        }
    }
}

fn print_history(records: &[&TxRecord]) {
    println!("\nBorrowing History:");
    if records.is_empty() {
        println!("No activity yet");
    }
    for record in records {
        println!("{record}");
    }
}

fn print_menu() {
    println!("\n--- Library Menu ---");
    println!("1. Add Book\t\t2. Update Book\t\t3. Remove Book");
    println!("4. Add Member\t\t5. Update Member\t6. Remove Member");
    println!("7. Issue Book\t\t8. Return Book\t\t9. Display Books");
    println!("10. Display Members\t11. Search Books\t12. Member History");
    println!("13. Book History\t14. Exit");
}

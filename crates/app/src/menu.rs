//! Interactive menu over the hotel engine
//!
//! Input validation happens here; the engine only sees well-formed ids
//! and counts.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use hilbert_core::{
    export_to_path, BatchReport, BigUint, Error, HilbertHotel, HotelConfig, Tag,
};

use crate::console::Console;
use crate::timing::timed;

const RULE_WIDTH: usize = 30;

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Enqueue,
    Assign,
    Display,
    Search,
    ManualAdd,
    ManualRemove,
    Save,
    Memory,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Enqueue),
            "2" => Some(MenuChoice::Assign),
            "3" => Some(MenuChoice::Display),
            "4" => Some(MenuChoice::Search),
            "5" => Some(MenuChoice::ManualAdd),
            "6" => Some(MenuChoice::ManualRemove),
            "7" => Some(MenuChoice::Save),
            "8" => Some(MenuChoice::Memory),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Enqueue => "Add group to queue",
            MenuChoice::Assign => "Assign all rooms",
            MenuChoice::Display => "Display all rooms",
            MenuChoice::Search => "Search for a room",
            MenuChoice::ManualAdd => "Manually add a guest",
            MenuChoice::ManualRemove => "Manually remove a guest",
            MenuChoice::Save => "Save to file",
            MenuChoice::Memory => "Check memory usage",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::Enqueue,
            MenuChoice::Assign,
            MenuChoice::Display,
            MenuChoice::Search,
            MenuChoice::ManualAdd,
            MenuChoice::ManualRemove,
            MenuChoice::Save,
            MenuChoice::Memory,
            MenuChoice::Exit,
        ]
    }

    fn key(&self) -> char {
        match self {
            MenuChoice::Enqueue => '1',
            MenuChoice::Assign => '2',
            MenuChoice::Display => '3',
            MenuChoice::Search => '4',
            MenuChoice::ManualAdd => '5',
            MenuChoice::ManualRemove => '6',
            MenuChoice::Save => '7',
            MenuChoice::Memory => '8',
            MenuChoice::Exit => '0',
        }
    }
}

/// Whether the menu loop keeps running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One interactive session: the hotel plus the console driving it
pub struct Session<R, W> {
    hotel: HilbertHotel,
    config: HotelConfig,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(hotel: HilbertHotel, config: HotelConfig, input: R, output: W) -> Self {
        let console = Console::new(input, output, config.clear_screen);
        Self {
            hotel,
            config,
            console,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (HilbertHotel, W) {
        (self.hotel, self.console.into_output())
    }

    /// Run the menu until the operator exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        self.console.refresh()?;

        loop {
            self.print_menu()?;
            let Some(input) = self.console.prompt("Enter your choice: ")? else {
                break;
            };
            self.console.refresh()?;

            let flow = match MenuChoice::parse(&input) {
                Some(choice) => {
                    tracing::debug!(?choice, "Menu command");
                    self.dispatch(choice)?
                }
                None => {
                    writeln!(self.console.out(), "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit || !self.console.pause()? {
                break;
            }
            self.console.refresh()?;
        }

        tracing::info!(occupants = self.hotel.len(), "Session ended");
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let out = self.console.out();
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "\n{}", rule)?;
        writeln!(out, "    Infinite Hotel Menu")?;
        writeln!(out, "{}", rule)?;
        for choice in MenuChoice::all() {
            writeln!(out, "{}. {}", choice.key(), choice.label())?;
        }
        writeln!(out, "{}", rule)
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        match choice {
            MenuChoice::Enqueue => self.enqueue()?,
            MenuChoice::Assign => self.assign()?,
            MenuChoice::Display => self.display()?,
            MenuChoice::Search => self.search()?,
            MenuChoice::ManualAdd => self.manual_add()?,
            MenuChoice::ManualRemove => self.manual_remove()?,
            MenuChoice::Save => self.save()?,
            MenuChoice::Memory => self.memory()?,
            MenuChoice::Exit => {
                writeln!(
                    self.console.out(),
                    "Thank you for using the Infinite Hotel system. Goodbye!"
                )?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Prompt for a value of type `T`, reporting unparseable input
    fn read_value<T: FromStr>(&mut self, message: &str) -> io::Result<Option<T>> {
        let Some(line) = self.console.prompt(message)? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(
                    self.console.out(),
                    "\nInvalid input. Please enter a valid number."
                )?;
                Ok(None)
            }
        }
    }

    /// Prompt for a room number, rejecting 0
    fn read_room(&mut self, message: &str) -> io::Result<Option<BigUint>> {
        let Some(room) = self.read_value::<BigUint>(message)? else {
            return Ok(None);
        };
        if room == BigUint::from(0u32) {
            writeln!(self.console.out(), "Error: Room number must be 1 or greater.")?;
            return Ok(None);
        }
        Ok(Some(room))
    }

    fn enqueue(&mut self) -> io::Result<()> {
        let Some(channel) = self.read_value::<u32>("Enter the route ID for the new group (> 0): ")?
        else {
            return Ok(());
        };
        if channel < 1 {
            writeln!(self.console.out(), "Error: Route ID must be 1 or greater.")?;
            return Ok(());
        }
        let message = format!("Enter the number of guests for route {}: ", channel);
        let Some(count) = self.read_value::<u32>(&message)? else {
            return Ok(());
        };

        let out = self.console.out();
        writeln!(
            out,
            "\n[State] Occupied rooms before adding to queue: {}",
            self.hotel.len()
        )?;
        match timed(out, "enqueue", || self.hotel.enqueue(channel, count))? {
            Ok(_) => writeln!(
                out,
                "Queued a request for {} guests from route {}.",
                count, channel
            ),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn assign(&mut self) -> io::Result<()> {
        let out = self.console.out();
        let pending = self.hotel.pending_total();
        if pending > 0 {
            writeln!(
                out,
                "\n[Assignment] Preparing to assign {} new guests to prime-numbered rooms...",
                pending
            )?;
        }
        match timed(out, "assign_pending", || self.hotel.assign_pending())? {
            Some(report) => write_batch(out, &report),
            None => writeln!(out, "No new guest requests in the queue to assign."),
        }
    }

    fn display(&mut self) -> io::Result<()> {
        let out = self.console.out();
        let occupants = timed(out, "sorted_room_numbers", || self.hotel.occupants())?;
        if occupants.is_empty() {
            return writeln!(out, "\nThe hotel is currently empty.");
        }

        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "\n{}", rule)?;
        writeln!(out, "   Hotel Residents List")?;
        writeln!(out, "{}", rule)?;
        for (room, guest) in &occupants {
            writeln!(out, "Room {:<6}: {}", room.to_string(), guest)?;
        }
        writeln!(out, "{}", rule)?;
        writeln!(out, "Total occupants: {}", occupants.len())
    }

    fn search(&mut self) -> io::Result<()> {
        let Some(room) = self.read_room("Enter the room number to search for: ")? else {
            return Ok(());
        };
        let out = self.console.out();
        match timed(out, "search", || self.hotel.search(&room).copied())? {
            Some(guest) => writeln!(out, "Room {} is occupied by: {}", room, guest),
            None => writeln!(out, "Room {} is vacant.", room),
        }
    }

    fn manual_add(&mut self) -> io::Result<()> {
        let Some(room) = self.read_room("Enter the room number to add to: ")? else {
            return Ok(());
        };
        let out = self.console.out();
        let result = timed(out, "add", || {
            self.hotel.add(room.clone(), Tag::Manual, Tag::Manual)
        })?;
        match result {
            Ok(guest) => writeln!(out, "Successfully added {} to room {}.", guest, room),
            Err(Error::Occupied { room, occupant }) => {
                writeln!(out, "Room {} is already occupied by {}.", room, occupant)
            }
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn manual_remove(&mut self) -> io::Result<()> {
        let Some(room) = self.read_room("Enter the room number to remove: ")? else {
            return Ok(());
        };
        let out = self.console.out();
        match timed(out, "remove", || self.hotel.remove(&room))? {
            Some(guest) => writeln!(out, "Successfully removed {} from room {}.", guest, room),
            None => writeln!(out, "Error: Room {} is not occupied.", room),
        }
    }

    fn save(&mut self) -> io::Result<()> {
        let message = format!(
            "Enter the filename (blank for {}): ",
            self.config.export_file.display()
        );
        let Some(line) = self.console.prompt(&message)? else {
            return Ok(());
        };
        let path = match line.trim() {
            "" => self.config.export_file.clone(),
            name => PathBuf::from(name),
        };

        let out = self.console.out();
        match timed(out, "export", || export_to_path(&self.hotel, &path))? {
            Ok(_) => writeln!(out, "Successfully saved hotel data to '{}'.", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                writeln!(out, "Error: {}", e)
            }
        }
    }

    fn memory(&mut self) -> io::Result<()> {
        let footprint = self.hotel.footprint();
        writeln!(self.console.out(), "\n[Memory] {}.", footprint)
    }
}

fn write_batch<W: Write>(out: &mut W, report: &BatchReport) -> io::Result<()> {
    for assignment in &report.assignments {
        if let Some(origin) = &assignment.probed_from {
            writeln!(
                out,
                "  [Collision] Room {} is occupied. Probing for a new room...",
                origin
            )?;
            writeln!(
                out,
                "  [Resolved] Found vacant Room {} for {}.",
                assignment.room, assignment.guest
            )?;
        }
        writeln!(
            out,
            "  Assigning {} -> Room {}",
            assignment.guest, assignment.room
        )?;
    }

    if report.aborted {
        writeln!(
            out,
            "\n[Warning] Assignment loop terminated early; {} queued guests were not assigned.",
            report.unassigned()
        )?;
    }
    writeln!(out, "\n[Assignment] Finished assigning all pending guests.")
}

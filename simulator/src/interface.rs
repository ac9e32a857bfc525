use crate::scenarios::Scenario;
use std::io::{self, Write};

pub enum SimulationType {
    Scenario(Scenario),
    Comparison,
    Exit,
}

impl SimulationType {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(SimulationType::Scenario(Scenario::MM1Merge)),
            "2" => Some(SimulationType::Scenario(Scenario::MM1Split)),
            "3" => Some(SimulationType::Scenario(Scenario::MMCMerge)),
            "4" => Some(SimulationType::Scenario(Scenario::MMCSplit)),
            "5" => Some(SimulationType::Scenario(Scenario::MM1Failure)),
            "6" => Some(SimulationType::Scenario(Scenario::MMCFailure)),
            "7" => Some(SimulationType::Comparison),
            "0" => Some(SimulationType::Exit),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct SimulatorInterface;

impl SimulatorInterface {
    pub fn new() -> Self {
        Self
    }

    pub fn get_menu_text(&self) -> String {
        let mut text = String::from("Available simulation types:");
        for (i, scenario) in Scenario::ALL.iter().enumerate() {
            text.push_str(&format!("\n  {}. {}", i + 1, scenario.title()));
        }
        text.push_str("\n  7. Compare M/M/1 and M/M/c split over 20 batches");
        text.push_str("\n  0. Exit");
        text
    }

    pub fn show_menu(&self) {
        println!("=== Queueflow Simulator ===");
        println!("{}", self.get_menu_text());
    }

    /// Reads one choice from stdin, `None` for unparsable input
    pub fn get_user_choice(&self) -> io::Result<Option<SimulationType>> {
        print!("\nSelect simulation type (0-7): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // stdin closed
            return Ok(Some(SimulationType::Exit));
        }
        Ok(SimulationType::from_input(&input))
    }
}

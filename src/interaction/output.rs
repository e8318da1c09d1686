use super::{Interaction, PrintInteraction};

impl PrintInteraction for Interaction {
    fn print_line(&self, line: &str) {
        println!("{line}");
    }
}

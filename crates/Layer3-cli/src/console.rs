//! Console output for the CLI host

use arbor_core::Messenger;
use arbor_foundation::Actor;

/// Prints every message on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMessenger;

impl Messenger for ConsoleMessenger {
    fn send(&self, _actor: &dyn Actor, message: &str) {
        println!("{}", message);
    }
}

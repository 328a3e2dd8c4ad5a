/// Monotonic request tickets.
///
/// A snapshot load takes a ticket before its request goes out and may only
/// apply its response if no newer ticket has been applied, so the last
/// request sent wins instead of the last response to arrive.
#[derive(Debug, Default, Clone)]
pub struct RequestSequencer {
    issued: u64,
    applied: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestSequencer {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Marks `ticket` applied. Returns false for a superseded ticket.
    pub fn try_apply(&mut self, ticket: Ticket) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        true
    }

    /// Every ticket issued so far becomes stale.
    pub fn invalidate(&mut self) {
        self.applied = self.issued;
    }
}

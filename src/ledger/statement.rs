use chrono::{DateTime, Local};

use crate::Amount;
use crate::model::MovementKind;

/// One completed operation on an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    kind: MovementKind,
    amount: Amount,
    timestamp: DateTime<Local>,
}

impl Movement {
    pub fn new(kind: MovementKind, amount: Amount, timestamp: DateTime<Local>) -> Self {
        Self {
            kind,
            amount,
            timestamp,
        }
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Append-only, chronologically ordered movement history of one account.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    movements: Vec<Movement>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a movement stamped with the current local time and return it.
    pub fn record(&mut self, kind: MovementKind, amount: Amount) -> &Movement {
        self.movements.push(Movement::new(kind, amount, Local::now()));
        &self.movements[self.movements.len() - 1]
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Number of recorded movements of the given kind.
    pub fn count(&self, kind: MovementKind) -> usize {
        self.movements.iter().filter(|m| m.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_statement_is_empty() {
        let statement = Statement::new();
        assert!(statement.is_empty());
        assert_eq!(statement.count(MovementKind::Withdrawal), 0);
    }

    #[test]
    fn record_appends_in_order() {
        let mut statement = Statement::new();
        statement.record(MovementKind::Deposit, Amount::from_units(100));
        statement.record(MovementKind::Withdrawal, Amount::from_units(30));
        statement.record(MovementKind::Deposit, Amount::from_units(5));

        let kinds: Vec<_> = statement.movements().iter().map(Movement::kind).collect();
        assert_eq!(
            kinds,
            [
                MovementKind::Deposit,
                MovementKind::Withdrawal,
                MovementKind::Deposit
            ]
        );
        assert_eq!(statement.len(), 3);
        assert_eq!(statement.count(MovementKind::Deposit), 2);
        assert_eq!(statement.count(MovementKind::Withdrawal), 1);

        let stamps: Vec<_> = statement.movements().iter().map(Movement::timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn record_returns_the_new_movement() {
        let mut statement = Statement::new();
        let movement = statement.record(MovementKind::Deposit, Amount::from_units(7));
        assert_eq!(movement.kind(), MovementKind::Deposit);
        assert_eq!(movement.amount(), Amount::from_units(7));
    }
}

use std::fmt;

use phf::phf_map;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Assoc {
    // Right,
    Left,
}
impl Assoc {
    pub fn is_left(&self) -> bool {
        self == &Assoc::Left
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}
impl BinOp {
    /// Plain IEEE-754 arithmetic, the evaluator is in charge of rejecting
    /// non-finite results.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinOp::Add => lhs + rhs,
            BinOp::Sub => lhs - rhs,
            BinOp::Mul => lhs * rhs,
            BinOp::Div => lhs / rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Operator {
    pub sym: &'static str,
    pub op: BinOp,
    pub assoc: Assoc,
    pub prec: u8,
}
impl Operator {
    pub fn lookup(sym: &str) -> Option<Operator> {
        BINARY_OPERATOR_TABLE.get(sym).copied()
    }

    /// Whether `self`, sitting on the operator stack, must be popped before
    /// `incoming` is pushed.
    pub fn has_bigger_prec(&self, incoming: &Operator) -> bool {
        self.prec > incoming.prec || (self.prec == incoming.prec && incoming.is_left_assoc())
    }

    pub fn is_left_assoc(&self) -> bool {
        self.assoc.is_left()
    }
}
impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sym)
    }
}

pub static BINARY_OPERATOR_TABLE: phf::Map<&'static str, Operator> = phf_map! {
    "+"  => Operator {
        prec: 1,
        assoc: Assoc::Left,
        op: BinOp::Add,
        sym: "+",
    },
    "-" => Operator {
        prec: 1,
        assoc: Assoc::Left,
        op: BinOp::Sub,
        sym: "-",
    },
    "/" => Operator {
        prec: 2,
        assoc: Assoc::Left,
        op: BinOp::Div,
        sym: "/",
    },
    "*" => Operator {
        prec: 2,
        assoc: Assoc::Left,
        op: BinOp::Mul,
        sym: "*",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    fn op(sym: &str) -> Operator {
        Operator::lookup(sym).unwrap()
    }

    #[test]
    fn table_holds_the_four_operators() {
        assert_eq!(BINARY_OPERATOR_TABLE.len(), 4);
        assert_eq!(op("*").prec, op("/").prec);
        assert_eq!(op("+").prec, op("-").prec);
        assert!(op("*").prec > op("+").prec);
        assert!(Operator::lookup("^").is_none());
    }

    #[test]
    fn ties_pop_before_push() {
        assert!(op("-").has_bigger_prec(&op("+")));
        assert!(op("/").has_bigger_prec(&op("*")));
        assert!(op("*").has_bigger_prec(&op("-")));
        assert!(!op("+").has_bigger_prec(&op("*")));
    }

    #[test]
    fn apply_follows_ieee() {
        assert_eq!(BinOp::Sub.apply(10.0, 3.0), 7.0);
        assert_eq!(BinOp::Div.apply(7.0, 2.0), 3.5);
        assert!(BinOp::Div.apply(1.0, 0.0).is_infinite());
    }
}

use crate::error::LogicError;

/// One-input operators. Bit 0 of the code is the output for input 1, bit 1 the
/// output for input 0, so `TRANSFER = 01` and `NOT = 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum UnaryOp {
    False = 0,
    Transfer = 1,
    Not = 2,
    True = 3,
}

/// Two-input operators, numbered by their 4-bit truth table.
///
/// Bit 0 holds the output for `(A,B) = (1,1)`, bit 1 for `(1,0)`, bit 2 for
/// `(0,1)` and bit 3 for `(0,0)`; written MSB first, `AND = 0001` and
/// `IMP = 1101`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BinaryOp {
    False = 0,
    And = 1,
    Nimp = 2,
    A = 3,
    Nrimp = 4,
    B = 5,
    Xor = 6,
    Or = 7,
    Nor = 8,
    Xnor = 9,
    Nb = 10,
    Rimp = 11,
    Na = 12,
    Imp = 13,
    Nand = 14,
    True = 15,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 4] = [
        UnaryOp::False,
        UnaryOp::Transfer,
        UnaryOp::Not,
        UnaryOp::True,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, LogicError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(LogicError::UnknownUnaryOp(code))
    }

    /// Applies the operator to 64 operand values at once.
    pub fn apply(self, a: u64) -> u64 {
        let code = self.code();
        let mut out = 0;
        if code & 0b01 != 0 {
            out |= a;
        }
        if code & 0b10 != 0 {
            out |= !a;
        }
        out
    }

    pub fn eval(self, a: bool) -> bool {
        (self.apply(if a { u64::MAX } else { 0 }) & 1) == 1
    }

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::False => "FALSE",
            UnaryOp::Transfer => "TRANSFER",
            UnaryOp::Not => "NOT",
            UnaryOp::True => "TRUE",
        }
    }
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 16] = [
        BinaryOp::False,
        BinaryOp::And,
        BinaryOp::Nimp,
        BinaryOp::A,
        BinaryOp::Nrimp,
        BinaryOp::B,
        BinaryOp::Xor,
        BinaryOp::Or,
        BinaryOp::Nor,
        BinaryOp::Xnor,
        BinaryOp::Nb,
        BinaryOp::Rimp,
        BinaryOp::Na,
        BinaryOp::Imp,
        BinaryOp::Nand,
        BinaryOp::True,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, LogicError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(LogicError::UnknownBinaryOp(code))
    }

    /// Applies the operator bitwise, one truth assignment per bit.
    pub fn apply(self, a: u64, b: u64) -> u64 {
        let code = self.code();
        let mut out = 0;
        if code & 0b0001 != 0 {
            out |= a & b;
        }
        if code & 0b0010 != 0 {
            out |= a & !b;
        }
        if code & 0b0100 != 0 {
            out |= !a & b;
        }
        if code & 0b1000 != 0 {
            out |= !a & !b;
        }
        out
    }

    pub fn eval(self, a: bool, b: bool) -> bool {
        let idx = (((!a) as u8) << 1) | (!b) as u8;
        ((self.code() >> idx) & 1) == 1
    }

    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            BinaryOp::False
                | BinaryOp::And
                | BinaryOp::Xor
                | BinaryOp::Or
                | BinaryOp::Nor
                | BinaryOp::Xnor
                | BinaryOp::Nand
                | BinaryOp::True
        )
    }

    pub fn is_associative(self) -> bool {
        matches!(
            self,
            BinaryOp::False
                | BinaryOp::And
                | BinaryOp::A
                | BinaryOp::B
                | BinaryOp::Xor
                | BinaryOp::Or
                | BinaryOp::Xnor
                | BinaryOp::True
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::False => "FALSE",
            BinaryOp::And => "AND",
            BinaryOp::Nimp => "NIMP",
            BinaryOp::A => "A",
            BinaryOp::Nrimp => "NRIMP",
            BinaryOp::B => "B",
            BinaryOp::Xor => "XOR",
            BinaryOp::Or => "OR",
            BinaryOp::Nor => "NOR",
            BinaryOp::Xnor => "XNOR",
            BinaryOp::Nb => "NB",
            BinaryOp::Rimp => "RIMP",
            BinaryOp::Na => "NA",
            BinaryOp::Imp => "IMP",
            BinaryOp::Nand => "NAND",
            BinaryOp::True => "TRUE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }
}

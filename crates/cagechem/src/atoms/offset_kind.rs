use std::fmt::{self, Display, Formatter};

use crate::OffsetKind;

impl OffsetKind {
    pub(crate) fn offset(self, count: u32) -> i64 {
        let count = i64::from(count);
        match self {
            Self::Add => count,
            Self::Remove => -count,
        }
    }
}

impl Display for OffsetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Remove => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_offsets() {
        assert_eq!(OffsetKind::Add.offset(3), 3);
        assert_eq!(OffsetKind::Remove.offset(3), -3);
        assert_eq!(OffsetKind::Remove.to_string(), "-");
    }
}

//! Static reflection hook consulted during serialization.

use crate::id::Symbol;

/// The statically declared side of an object's field set.
///
/// Objects that carry a dynamic property store usually also declare fields
/// at the type level. Those are persisted by a separate path, so dynamic
/// entries whose key matches a static field are skipped when the store is
/// written out.
pub trait StaticFields {
    /// Keys of the statically declared fields.
    fn static_fields(&self) -> &[Symbol];

    /// Per-entry veto for persisted output.
    ///
    /// Consulted by `write_fields` only; printing ignores it. The default
    /// writes everything.
    fn should_write_field(&self, _key: Symbol, _value: &str) -> bool {
        true
    }

    /// Whether `key` is shadowed by a static field.
    fn is_static_field(&self, key: Symbol) -> bool {
        self.static_fields().contains(&key)
    }
}

impl StaticFields for [Symbol] {
    fn static_fields(&self) -> &[Symbol] {
        self
    }
}

impl<const N: usize> StaticFields for [Symbol; N] {
    fn static_fields(&self) -> &[Symbol] {
        self
    }
}

impl StaticFields for Vec<Symbol> {
    fn static_fields(&self) -> &[Symbol] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Locked {
        fields: Vec<Symbol>,
    }

    impl StaticFields for Locked {
        fn static_fields(&self) -> &[Symbol] {
            &self.fields
        }

        fn should_write_field(&self, key: Symbol, _value: &str) -> bool {
            key != Symbol(9)
        }
    }

    #[test]
    fn slice_impl_reports_membership() {
        let list = [Symbol(1), Symbol(2)];
        assert!(list.is_static_field(Symbol(2)));
        assert!(!list.is_static_field(Symbol(3)));
        assert!(list.should_write_field(Symbol(3), "x"));
    }

    #[test]
    fn custom_impl_can_veto() {
        let obj = Locked {
            fields: vec![Symbol(0)],
        };
        assert!(obj.is_static_field(Symbol(0)));
        assert!(!obj.should_write_field(Symbol(9), "x"));
        assert!(obj.should_write_field(Symbol(1), "x"));
    }
}

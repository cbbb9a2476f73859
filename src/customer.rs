//! Customers.
//!
//! The two identity modes attachable to a transaction. A guest carries only
//! a first name beyond the customer record created for the sale; a member
//! carries a persistent membership id and their resolved full name.

/// Customer identity attached to a transaction at start; immutable for the
/// transaction's duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    /// A walk-in guest.
    Guest {
        /// Persistent id of the customer record created for this sale.
        id: i64,

        /// First name as entered at the register.
        first_name: String,
    },

    /// A registered member.
    Member {
        /// Persistent customer id.
        id: i64,

        /// Membership id as carried on the member's card.
        membership_id: String,

        /// Resolved full name.
        full_name: String,
    },
}

impl CustomerRef {
    /// The persistent customer id behind this identity.
    #[must_use]
    pub fn customer_id(&self) -> i64 {
        match self {
            CustomerRef::Guest { id, .. } | CustomerRef::Member { id, .. } => *id,
        }
    }

    /// The name shown on screen and on the receipt.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            CustomerRef::Guest { first_name, .. } => first_name,
            CustomerRef::Member { full_name, .. } => full_name,
        }
    }

    /// Whether this identity is a member.
    #[must_use]
    pub fn is_member(&self) -> bool {
        matches!(self, CustomerRef::Member { .. })
    }
}

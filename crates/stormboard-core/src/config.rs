//! Static sticky-type configuration.
//!
//! Centralizes the per-type lookup tables (label, icon, fill color,
//! legend copy, creation templates) and the auto-align column order.
//! The tables are immutable; `validate` checks them for total coverage
//! of the [`StickyType`] enumeration at process start.

use thiserror::Error;

use crate::sticky::{SerializableColor, StickyType};

/// Display and creation configuration for one sticky type.
#[derive(Debug)]
pub struct StickyConfig {
    /// Header / toolbar label.
    pub label: &'static str,
    /// Icon glyph shown next to the label.
    pub icon: &'static str,
    /// Fill color for new notes of this type.
    pub color: SerializableColor,
    /// One-line event-storming description (tooltip and legend copy).
    pub description: &'static str,
    /// Text templates a new note is prefilled from. Never empty.
    pub templates: &'static [&'static str],
}

static EVENT: StickyConfig = StickyConfig {
    label: "Event",
    icon: "📅",
    color: SerializableColor::opaque(251, 146, 60),
    description: "Something that happened in the domain, named in past tense",
    templates: &["Order Placed", "Payment Received", "Item Shipped", "Account Created"],
};

static COMMAND: StickyConfig = StickyConfig {
    label: "Command",
    icon: "⚡",
    color: SerializableColor::opaque(96, 165, 250),
    description: "An intent to change the system, issued by an actor or policy",
    templates: &["Place Order", "Cancel Subscription", "Approve Refund", "Register Account"],
};

static AGGREGATE: StickyConfig = StickyConfig {
    label: "Aggregate",
    icon: "📦",
    color: SerializableColor::opaque(253, 224, 71),
    description: "The consistency boundary that accepts commands and emits events",
    templates: &["Order", "Customer", "Invoice", "Inventory"],
};

static ACTOR: StickyConfig = StickyConfig {
    label: "Actor",
    icon: "👤",
    color: SerializableColor::opaque(249, 168, 212),
    description: "A person or role that issues commands",
    templates: &["Customer", "Back-office Clerk", "Warehouse Operator", "Administrator"],
};

static READ_MODEL: StickyConfig = StickyConfig {
    label: "Read Model",
    icon: "📊",
    color: SerializableColor::opaque(74, 222, 128),
    description: "A view of the system an actor consults before deciding",
    templates: &["Order History", "Stock Levels", "Account Summary", "Daily Report"],
};

static HOT_SPOT: StickyConfig = StickyConfig {
    label: "Hot Spot",
    icon: "🔥",
    color: SerializableColor::opaque(248, 113, 113),
    description: "A problem, conflict or open question to revisit",
    templates: &["Unclear ownership?", "Race condition here?", "Who approves this?"],
};

static SYSTEM: StickyConfig = StickyConfig {
    label: "External System",
    icon: "🖥",
    color: SerializableColor::opaque(196, 181, 253),
    description: "A third-party or legacy system the domain talks to",
    templates: &["Payment Gateway", "Email Provider", "Shipping Carrier", "Legacy ERP"],
};

static POLICY: StickyConfig = StickyConfig {
    label: "Policy",
    icon: "📜",
    color: SerializableColor::opaque(192, 132, 252),
    description: "Whenever <event>, then <command>: reactive business rules",
    templates: &[
        "Whenever order placed, reserve stock",
        "Whenever payment failed, notify customer",
        "Whenever refund approved, release funds",
    ],
};

static VALUE: StickyConfig = StickyConfig {
    label: "Value",
    icon: "💎",
    color: SerializableColor::opaque(94, 234, 212),
    description: "The business value or outcome a flow exists to produce",
    templates: &["Faster checkout", "Fewer chargebacks", "Lower support load"],
};

static SKETCH: StickyConfig = StickyConfig {
    label: "Sketch",
    icon: "✏",
    color: SerializableColor::opaque(203, 213, 225),
    description: "A UI sketch or free-form annotation",
    templates: &["Checkout screen", "Confirmation dialog", "Dashboard widget"],
};

static BOUNDED_CONTEXT: StickyConfig = StickyConfig {
    label: "Bounded Context",
    icon: "🗺",
    color: SerializableColor::opaque(241, 245, 249),
    description: "A large dashed region grouping one model's language",
    templates: &["Ordering", "Billing", "Fulfilment", "Identity"],
};

/// Look up the configuration for a sticky type.
pub fn sticky_config(sticky_type: StickyType) -> &'static StickyConfig {
    match sticky_type {
        StickyType::Event => &EVENT,
        StickyType::Command => &COMMAND,
        StickyType::Aggregate => &AGGREGATE,
        StickyType::Actor => &ACTOR,
        StickyType::ReadModel => &READ_MODEL,
        StickyType::HotSpot => &HOT_SPOT,
        StickyType::System => &SYSTEM,
        StickyType::Policy => &POLICY,
        StickyType::Value => &VALUE,
        StickyType::Sketch => &SKETCH,
        StickyType::BoundedContext => &BOUNDED_CONTEXT,
    }
}

/// Column priority for auto-align: bounded contexts first, then the
/// left-to-right narrative order of the event-storming method.
pub const LAYOUT_ORDER: [StickyType; 11] = [
    StickyType::BoundedContext,
    StickyType::Actor,
    StickyType::Command,
    StickyType::System,
    StickyType::Event,
    StickyType::Policy,
    StickyType::Aggregate,
    StickyType::ReadModel,
    StickyType::Value,
    StickyType::HotSpot,
    StickyType::Sketch,
];

/// Configuration table errors, all fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sticky type '{0}' is missing from the layout order table")]
    MissingFromLayoutOrder(&'static str),
    #[error("sticky type '{0}' appears more than once in the layout order table")]
    DuplicateInLayoutOrder(&'static str),
    #[error("sticky type '{0}' has no text templates")]
    EmptyTemplates(&'static str),
}

/// Check every table for total coverage of the closed type set.
///
/// Called once at process start; any error aborts startup.
pub fn validate() -> Result<(), ConfigError> {
    for t in StickyType::ALL {
        let occurrences = LAYOUT_ORDER.iter().filter(|&&o| o == t).count();
        if occurrences == 0 {
            return Err(ConfigError::MissingFromLayoutOrder(t.tag()));
        }
        if occurrences > 1 {
            return Err(ConfigError::DuplicateInLayoutOrder(t.tag()));
        }
        if sticky_config(t).templates.is_empty() {
            return Err(ConfigError::EmptyTemplates(t.tag()));
        }
    }
    Ok(())
}

/// Pick a template for a new note of the given type.
///
/// Uses a counter + hash approach (splitmix32-like) so template choice
/// needs no RNG dependency and works on all platforms.
pub fn pick_template(sticky_type: StickyType) -> &'static str {
    use std::sync::atomic::{AtomicU32, Ordering};

    static PICK_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = PICK_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;

    let templates = sticky_config(sticky_type).templates;
    templates[x as usize % templates.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_total() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn test_layout_order_covers_every_type_once() {
        assert_eq!(LAYOUT_ORDER.len(), StickyType::ALL.len());
        for t in StickyType::ALL {
            assert_eq!(LAYOUT_ORDER.iter().filter(|&&o| o == t).count(), 1);
        }
    }

    #[test]
    fn test_bounded_context_is_first_column() {
        assert_eq!(LAYOUT_ORDER[0], StickyType::BoundedContext);
    }

    #[test]
    fn test_pick_template_comes_from_table() {
        for _ in 0..32 {
            let template = pick_template(StickyType::Event);
            assert!(sticky_config(StickyType::Event).templates.contains(&template));
        }
    }
}

use super::Serializer;

use rowbind_core::driver::{Capability, SqlFlavor};

#[derive(Debug, Clone, Copy)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    /// Picks the serializer matching a connection's SQL dialect.
    pub fn for_capability(capability: &Capability) -> Serializer {
        match capability.flavor {
            SqlFlavor::Postgresql => Serializer::postgresql(),
            SqlFlavor::Sqlite => Serializer::sqlite(),
        }
    }
}

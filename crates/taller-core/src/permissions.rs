// ── Permission-gated navigation ──
//
// A role grants a fixed set of capabilities. Screens are reachable only
// when the session holds the capability they need. Gating is advisory:
// the backend enforces its own authorization, so a denied screen is
// simply not offered and never raises an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

// ── Capability ──────────────────────────────────────────────────────

/// One grantable capability. The string form is the backend's JSON key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum Capability {
    #[strum(serialize = "gestionUsuarios")]
    ManageUsers,
    #[strum(serialize = "gestionVehiculos")]
    ManageVehicles,
    #[strum(serialize = "gestionServicios")]
    ManageServices,
    #[strum(serialize = "gestionOrdenes")]
    ManageOrders,
    #[strum(serialize = "gestionPagos")]
    ManagePayments,
    #[strum(serialize = "verReportes")]
    ViewReports,
}

impl Capability {
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

// ── PermissionSet ───────────────────────────────────────────────────

/// Capabilities granted to a session, stored as a bitset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet(u8);

impl PermissionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Capability::iter().collect()
    }

    pub fn contains(self, cap: Capability) -> bool {
        self.0 & cap.bit() != 0
    }

    pub fn insert(&mut self, cap: Capability) {
        self.0 |= cap.bit();
    }

    pub fn remove(&mut self, cap: Capability) {
        self.0 &= !cap.bit();
    }

    /// Set or clear `cap` according to `granted`.
    pub fn set(&mut self, cap: Capability, granted: bool) {
        if granted {
            self.insert(cap);
        } else {
            self.remove(cap);
        }
    }

    #[must_use]
    pub fn with(mut self, cap: Capability) -> Self {
        self.insert(cap);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Granted capabilities, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Self::empty();
        for cap in iter {
            set.insert(cap);
        }
        set
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&'static str> = self.iter().map(<&'static str>::from).collect();
        f.write_str(&names.join(", "))
    }
}

// Serialized as the backend's object of named booleans.
impl Serialize for PermissionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(6))?;
        for cap in Capability::iter() {
            map.serialize_entry(cap.as_ref(), &self.contains(cap))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(crate::convert::permissions_from_wire(&value))
    }
}

// ── Screen ──────────────────────────────────────────────────────────

/// A management area of the console.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Vehicles,
    Services,
    Inventory,
    Orders,
    Payments,
    Employees,
    Users,
    Roles,
    Reports,
}

impl Screen {
    /// Capability that unlocks this screen.
    pub fn required_capability(self) -> Capability {
        match self {
            Self::Vehicles => Capability::ManageVehicles,
            Self::Services | Self::Inventory => Capability::ManageServices,
            Self::Orders => Capability::ManageOrders,
            Self::Payments => Capability::ManagePayments,
            Self::Employees | Self::Users | Self::Roles => Capability::ManageUsers,
            Self::Reports => Capability::ViewReports,
        }
    }

    /// Heading shown to operators.
    pub fn title(self) -> &'static str {
        match self {
            Self::Vehicles => "Vehículos",
            Self::Services => "Servicios",
            Self::Inventory => "Inventario",
            Self::Orders => "Órdenes",
            Self::Payments => "Pagos",
            Self::Employees => "Empleados",
            Self::Users => "Usuarios",
            Self::Roles => "Roles",
            Self::Reports => "Reportes",
        }
    }
}

/// Whether `permissions` unlock `screen`. Pure; never errors.
pub fn can_access(permissions: PermissionSet, screen: Screen) -> bool {
    permissions.contains(screen.required_capability())
}

/// Every screen `permissions` unlock, in menu order.
pub fn navigable_screens(permissions: PermissionSet) -> Vec<Screen> {
    Screen::iter()
        .filter(|s| can_access(permissions, *s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bitset_insert_remove() {
        let mut set = PermissionSet::empty();
        assert!(set.is_empty());
        set.insert(Capability::ManageOrders);
        set.insert(Capability::ViewReports);
        assert!(set.contains(Capability::ManageOrders));
        assert!(!set.contains(Capability::ManageUsers));
        set.remove(Capability::ManageOrders);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Capability::ViewReports]);
        assert_eq!(PermissionSet::all().iter().count(), 6);
    }

    #[test]
    fn services_capability_unlocks_inventory_too() {
        let set = PermissionSet::empty().with(Capability::ManageServices);
        assert_eq!(
            navigable_screens(set),
            vec![Screen::Services, Screen::Inventory]
        );
        assert!(!can_access(set, Screen::Orders));
    }

    #[test]
    fn user_management_unlocks_people_screens() {
        let set = PermissionSet::empty().with(Capability::ManageUsers);
        assert_eq!(
            navigable_screens(set),
            vec![Screen::Employees, Screen::Users, Screen::Roles]
        );
    }

    #[test]
    fn empty_set_denies_everything() {
        assert!(navigable_screens(PermissionSet::empty()).is_empty());
    }

    #[test]
    fn screen_names_parse_case_insensitively() {
        assert_eq!("Orders".parse::<Screen>().ok(), Some(Screen::Orders));
        assert_eq!(Screen::Payments.to_string(), "payments");
        assert_eq!(Capability::ViewReports.to_string(), "verReportes");
    }

    #[test]
    fn displays_granted_keys_in_declaration_order() {
        let set = PermissionSet::empty()
            .with(Capability::ViewReports)
            .with(Capability::ManageVehicles);
        assert_eq!(set.to_string(), "gestionVehiculos, verReportes");
        assert_eq!(PermissionSet::empty().to_string(), "");
    }

    #[test]
    fn serializes_as_named_booleans() {
        let set = PermissionSet::empty().with(Capability::ManagePayments);
        let json = serde_json::to_value(set).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "gestionUsuarios": false,
                "gestionVehiculos": false,
                "gestionServicios": false,
                "gestionOrdenes": false,
                "gestionPagos": true,
                "verReportes": false
            }))
        );
    }
}

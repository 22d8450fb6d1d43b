use serde::{Deserialize, Serialize};

// --- Role Definition ---

/// Actor roles of the canvassing app, highest authority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SystemAdmin,
    Party,
    Candidate,
    AssemblyCoordinator,
    BlockCoordinator,
    PanchayatCoordinator,
    FieldVolunteer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "system_admin",
            Role::Party => "party",
            Role::Candidate => "candidate",
            Role::AssemblyCoordinator => "assembly_coordinator",
            Role::BlockCoordinator => "block_coordinator",
            Role::PanchayatCoordinator => "panchayat_coordinator",
            Role::FieldVolunteer => "field_volunteer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "system_admin" => Some(Role::SystemAdmin),
            "party" => Some(Role::Party),
            "candidate" => Some(Role::Candidate),
            "assembly_coordinator" => Some(Role::AssemblyCoordinator),
            "block_coordinator" => Some(Role::BlockCoordinator),
            "panchayat_coordinator" => Some(Role::PanchayatCoordinator),
            "field_volunteer" => Some(Role::FieldVolunteer),
            _ => None,
        }
    }

    /// Label shown on the role's dashboard header
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "System Admin",
            Role::Party => "Party",
            Role::Candidate => "Candidate",
            Role::AssemblyCoordinator => "Assembly Coordinator",
            Role::BlockCoordinator => "Block Coordinator",
            Role::PanchayatCoordinator => "Panchayat Coordinator",
            Role::FieldVolunteer => "Field Volunteer",
        }
    }

    /// Position in the organisation hierarchy, 0 being the top.
    pub fn level(&self) -> u8 {
        match self {
            Role::SystemAdmin => 0,
            Role::Party => 1,
            Role::Candidate => 2,
            Role::AssemblyCoordinator => 3,
            Role::BlockCoordinator => 4,
            Role::PanchayatCoordinator => 5,
            Role::FieldVolunteer => 6,
        }
    }

    /// True when this role sits strictly above `other` in the hierarchy
    pub fn outranks(&self, other: Role) -> bool {
        self.level() < other.level()
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(
            self,
            Role::AssemblyCoordinator | Role::BlockCoordinator | Role::PanchayatCoordinator
        )
    }

    pub fn all() -> [Role; 7] {
        [
            Role::SystemAdmin,
            Role::Party,
            Role::Candidate,
            Role::AssemblyCoordinator,
            Role::BlockCoordinator,
            Role::PanchayatCoordinator,
            Role::FieldVolunteer,
        ]
    }
}

// --- Resource Definition ---

/// Data areas a role can be granted actions on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    Users,
    Voters,
    Booths,
    Constituencies,
    Reports,
    Settings,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::Users => "users",
            Resource::Voters => "voters",
            Resource::Booths => "booths",
            Resource::Constituencies => "constituencies",
            Resource::Reports => "reports",
            Resource::Settings => "settings",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dashboard" => Some(Resource::Dashboard),
            "users" => Some(Resource::Users),
            "voters" => Some(Resource::Voters),
            "booths" => Some(Resource::Booths),
            "constituencies" => Some(Resource::Constituencies),
            "reports" => Some(Resource::Reports),
            "settings" => Some(Resource::Settings),
            _ => None,
        }
    }

    pub fn all() -> [Resource; 7] {
        [
            Resource::Dashboard,
            Resource::Users,
            Resource::Voters,
            Resource::Booths,
            Resource::Constituencies,
            Resource::Reports,
            Resource::Settings,
        ]
    }
}

// --- Action Definition ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    ListAll,
    Export,
    Import,
    Assign,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::ListAll => "list_all",
            Action::Export => "export",
            Action::Import => "import",
            Action::Assign => "assign",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Action::Create),
            "read" => Some(Action::Read),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "list_all" => Some(Action::ListAll),
            "export" => Some(Action::Export),
            "import" => Some(Action::Import),
            "assign" => Some(Action::Assign),
            _ => None,
        }
    }

    /// Whether this action means anything for `resource`.
    pub fn applies_to(&self, resource: Resource) -> bool {
        match resource {
            Resource::Dashboard => matches!(self, Action::Read),
            Resource::Settings => matches!(self, Action::Read | Action::Update),
            Resource::Reports => matches!(self, Action::Read | Action::Export),
            Resource::Users => true,
            Resource::Voters => !matches!(self, Action::Assign),
            Resource::Booths => true,
            Resource::Constituencies => matches!(
                self,
                Action::Read | Action::Update | Action::ListAll | Action::Export
            ),
        }
    }

    pub fn all() -> [Action; 8] {
        [
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::ListAll,
            Action::Export,
            Action::Import,
            Action::Assign,
        ]
    }

    /// Every action that applies to `resource`, in declaration order
    pub fn applicable_to(resource: Resource) -> Vec<Action> {
        Action::all()
            .into_iter()
            .filter(|action| action.applies_to(resource))
            .collect()
    }
}

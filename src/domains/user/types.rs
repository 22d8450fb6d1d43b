use serde::{Deserialize, Serialize};

use crate::domains::filter::{
    parse_flag, FieldKind, FieldValue, FilterPredicate, FilterableRecord, RecordField,
};
use crate::domains::permission::{Resource, Role};

/// App user (party worker, coordinator, volunteer) as listed on the users screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub active: bool,
    pub booth_code: Option<String>,
    pub constituency: Option<String>,
    /// Block or panchayat a coordinator is responsible for
    pub assigned_area: Option<String>,
}

fn default_true() -> bool {
    true
}

impl UserRecord {
    pub fn is_coordinator(&self) -> bool {
        self.role.is_coordinator()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Name,
    Phone,
    Email,
    Role,
    Active,
    BoothCode,
    Constituency,
    AssignedArea,
}

impl RecordField for UserField {
    fn name(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Name => "name",
            UserField::Phone => "phone",
            UserField::Email => "email",
            UserField::Role => "role",
            UserField::Active => "active",
            UserField::BoothCode => "booth_code",
            UserField::Constituency => "constituency",
            UserField::AssignedArea => "assigned_area",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            UserField::Id | UserField::Phone | UserField::Email | UserField::BoothCode => {
                FieldKind::Identifier
            }
            UserField::Name | UserField::AssignedArea => FieldKind::Text,
            UserField::Role | UserField::Constituency => FieldKind::Categorical,
            UserField::Active => FieldKind::Flag,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(UserField::Id),
            "name" => Some(UserField::Name),
            "phone" => Some(UserField::Phone),
            "email" => Some(UserField::Email),
            "role" => Some(UserField::Role),
            "active" => Some(UserField::Active),
            "booth_code" => Some(UserField::BoothCode),
            "constituency" => Some(UserField::Constituency),
            "assigned_area" => Some(UserField::AssignedArea),
            _ => None,
        }
    }
}

const SEARCH_FIELDS: [UserField; 4] = [UserField::Name, UserField::Phone, UserField::Email, UserField::AssignedArea];

impl FilterableRecord for UserRecord {
    type Field = UserField;

    const RESOURCE: Resource = Resource::Users;

    fn value(&self, field: UserField) -> FieldValue<'_> {
        match field {
            UserField::Id => FieldValue::text(&self.id),
            UserField::Name => FieldValue::text(&self.name),
            UserField::Phone => FieldValue::opt_text(self.phone.as_deref()),
            UserField::Email => FieldValue::opt_text(self.email.as_deref()),
            UserField::Role => FieldValue::Text(self.role.as_str()),
            UserField::Active => FieldValue::Flag(self.active),
            UserField::BoothCode => FieldValue::opt_text(self.booth_code.as_deref()),
            UserField::Constituency => FieldValue::opt_text(self.constituency.as_deref()),
            UserField::AssignedArea => FieldValue::opt_text(self.assigned_area.as_deref()),
        }
    }

    fn search_fields() -> &'static [UserField] {
        &SEARCH_FIELDS
    }

    fn parse_filter(key: &str, value: &str) -> Option<FilterPredicate<UserField>> {
        let predicate = match key {
            "role" => {
                // Only real roles; a typo must not silently match nobody
                let role = Role::from_str(value)?;
                FilterPredicate::equals(UserField::Role, role.as_str())
            }
            "status" => match value.to_ascii_lowercase().as_str() {
                "active" => FilterPredicate::equals(UserField::Active, "true"),
                "inactive" => FilterPredicate::equals(UserField::Active, "false"),
                _ => return None,
            },
            "active" => {
                parse_flag(value)?;
                FilterPredicate::equals(UserField::Active, value)
            }
            "booth_code" | "booth" => FilterPredicate::equals(UserField::BoothCode, value),
            "constituency" => FilterPredicate::equals(UserField::Constituency, value),
            "name" => FilterPredicate::contains(UserField::Name, value),
            "area" | "assigned_area" => FilterPredicate::contains(UserField::AssignedArea, value),
            _ => return None,
        };
        Some(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::filter::{FilterEngine, FilterSelection};

    fn users() -> Vec<UserRecord> {
        serde_json::from_str(
            r#"[
                {"id":"u1","name":"Rakesh Verma","role":"block_coordinator","assigned_area":"Danapur Block"},
                {"id":"u2","name":"Meena Kumari","role":"field_volunteer","booth_code":"B-101","active":false},
                {"id":"u3","name":"Sanjay Yadav","role":"field_volunteer","booth_code":"B-102","phone":"9876511111"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_active_defaults_to_true() {
        let users = users();
        assert!(users[0].active);
        assert!(!users[1].active);
        assert!(users[0].is_coordinator());
    }

    #[test]
    fn test_role_and_status_filters() {
        let engine = FilterEngine::default();
        let users = users();
        let parsed = FilterSelection::new()
            .set("role", "field_volunteer")
            .set("status", "active")
            .into_spec::<UserRecord>();
        assert!(parsed.ignored.is_empty());
        let ids: Vec<&str> = engine.apply(&users, &parsed.spec).iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u3"]);
    }

    #[test]
    fn test_unknown_role_value_is_ignored() {
        let parsed = FilterSelection::new().set("role", "superuser").into_spec::<UserRecord>();
        assert!(parsed.spec.is_empty());
        assert_eq!(parsed.ignored, vec!["role".to_string()]);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in SEARCH_FIELDS {
            assert_eq!(UserField::from_name(field.name()), Some(field));
        }
        assert_eq!(UserField::from_name("password"), None);
    }
}

use std::collections::BTreeMap;

/// Alliance name -> ordered member parties.
#[derive(Debug, Clone)]
pub struct AllianceResolver {
    alliances: Vec<(String, Vec<String>)>,
}

impl AllianceResolver {
    /// Alliances are kept in the given order; it decides `alliance_of` for
    /// parties listed under more than one alliance.
    pub fn new(alliances: Vec<(String, Vec<String>)>) -> Self {
        Self { alliances }
    }

    pub fn from_config(alliances: &BTreeMap<String, Vec<String>>) -> Self {
        Self::new(
            alliances
                .iter()
                .map(|(name, parties)| (name.clone(), parties.clone()))
                .collect(),
        )
    }

    /// Members of `alliance_name`; empty for unknown names.
    pub fn members_of(&self, alliance_name: &str) -> &[String] {
        self.alliances
            .iter()
            .find(|(name, _)| name == alliance_name)
            .map(|(_, parties)| parties.as_slice())
            .unwrap_or(&[])
    }

    /// Party names compare ignoring case; alliance names are exact.
    pub fn is_member(&self, alliance_name: &str, party: &str) -> bool {
        self.members_of(alliance_name).iter().any(|member| same_party(member, party))
    }

    /// First alliance that lists `party`, ignoring case
    pub fn alliance_of(&self, party: &str) -> Option<&str> {
        self.alliances
            .iter()
            .find(|(_, parties)| parties.iter().any(|member| same_party(member, party)))
            .map(|(name, _)| name.as_str())
    }

    pub fn alliance_names(&self) -> Vec<&str> {
        self.alliances.iter().map(|(name, _)| name.as_str()).collect()
    }
}

fn same_party(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Default for AllianceResolver {
    fn default() -> Self {
        let alliance = |name: &str, parties: &[&str]| {
            (name.to_string(), parties.iter().map(|p| p.to_string()).collect())
        };
        Self::new(vec![
            alliance("NDA", &["BJP", "JD(U)", "LJP(RV)", "HAM(S)", "RLM"]),
            alliance("INDIA", &["RJD", "INC", "CPI(ML)L", "CPI", "CPI(M)", "VIP"]),
            alliance("OTHERS", &["BSP", "AIMIM", "JSP"]),
        ])
    }
}

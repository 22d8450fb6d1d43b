use crate::domains::voter::VoterRecord;

#[allow(clippy::too_many_arguments)]
fn voter(
    id: &str,
    name: &str,
    gender: &str,
    age: u32,
    caste: &str,
    booth_code: &str,
    current_preference: Option<&str>,
    prior_choice: Option<&str>,
) -> VoterRecord {
    VoterRecord {
        id: id.to_string(),
        epic_id: format!("BR/29/172/{:06}", &id[1..].parse::<u32>().unwrap_or(0)),
        name: name.to_string(),
        phonetic_name: None,
        relative_name: None,
        gender: Some(gender.to_string()),
        age: Some(age),
        caste: Some(caste.to_string()),
        religion: Some("Hindu".to_string()),
        phone: None,
        address: None,
        booth_code: booth_code.to_string(),
        constituency: Some("Danapur".to_string()),
        panchayat: None,
        current_preference: current_preference.map(str::to_string),
        prior_choice: prior_choice.map(str::to_string),
        support_level: None,
        verified: false,
    }
}

/// Six voters: three men, three women, ages 25 to 52, General/OBC/SC castes.
pub(crate) fn sample_voters() -> Vec<VoterRecord> {
    let mut ramesh = voter("v1", "Ramesh Kumar", "M", 25, "Yadav", "B-101", Some("BJP"), Some("RJD"));
    ramesh.phone = Some("9876500001".to_string());
    ramesh.address = Some("Ward 3, Danapur Cantt".to_string());
    ramesh.support_level = Some("strong".to_string());

    let mut sunita = voter("v2", "Sunita Devi", "F", 29, "Brahmin", "B-101", Some("RJD"), Some("RJD"));
    sunita.phonetic_name = Some("सुनीता देवी".to_string());
    sunita.verified = true;

    let anil = voter("v3", "Anil Paswan", "M", 33, "Paswan", "B-102", Some("LJP(RV)"), Some("JD(U)"));

    let mut priya = voter("v4", "Priya Kumari", "F", 38, "Kurmi", "B-102", Some("INC"), Some("BJP"));
    priya.phone = Some("9876500004".to_string());

    let mohan = voter("v5", "Mohan Singh", "M", 45, "Rajput", "B-103", None, Some("JSP"));

    let mut geeta = voter("v6", "Geeta Ravidas", "F", 52, "Ravidas", "B-103", Some("BSP"), None);
    geeta.address = Some("Mahadalit Tola, Ward 7".to_string());

    vec![ramesh, sunita, anil, priya, mohan, geeta]
}

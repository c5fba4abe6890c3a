use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub const GROUP_MIN_MEMBERS: usize = 4;
pub const GROUP_MAX_MEMBERS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanceType {
    Solo,
    Duo,
    Group,
}

impl DanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Duo => "duo",
            Self::Group => "group",
        }
    }
}

impl FromStr for DanceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solo" => Ok(Self::Solo),
            "duo" => Ok(Self::Duo),
            "group" => Ok(Self::Group),
            _ => Err(invalid_choice("dance type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "7-9")]
    SevenToNine,
    #[serde(rename = "9-12")]
    NineToTwelve,
    #[serde(rename = "12-17")]
    TwelveToSeventeen,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenToNine => "7-9",
            Self::NineToTwelve => "9-12",
            Self::TwelveToSeventeen => "12-17",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7-9" => Ok(Self::SevenToNine),
            "9-12" => Ok(Self::NineToTwelve),
            "12-17" => Ok(Self::TwelveToSeventeen),
            _ => Err(invalid_choice("age group", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Naya Bharat")]
    NayaBharat,
    Mythology,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NayaBharat => "Naya Bharat",
            Self::Mythology => "Mythology",
        }
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Naya Bharat" => Ok(Self::NayaBharat),
            "Mythology" => Ok(Self::Mythology),
            _ => Err(invalid_choice("theme", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DanceCategory {
    #[serde(rename = "Western Freestyle")]
    WesternFreestyle,
    Classical,
    Folk,
}

impl DanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WesternFreestyle => "Western Freestyle",
            Self::Classical => "Classical",
            Self::Folk => "Folk",
        }
    }
}

impl FromStr for DanceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Western Freestyle" => Ok(Self::WesternFreestyle),
            "Classical" => Ok(Self::Classical),
            "Folk" => Ok(Self::Folk),
            _ => Err(invalid_choice("category", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(invalid_choice("gender", s)),
        }
    }
}

fn invalid_choice(field: &'static str, value: &str) -> DomainError {
    DomainError::InvalidChoice {
        field,
        value: value.to_string(),
    }
}

/// Who performs the entry. The variant fixes the dance type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participants {
    Solo,
    Duo { first: String, second: String },
    Group { members: Vec<String> },
}

impl Participants {
    /// Duo entries need both names; group entries keep only non-blank
    /// names and need between 4 and 12 of them. Names given for a solo
    /// entry are dropped.
    pub fn new(
        dance_type: DanceType,
        participant1_name: Option<String>,
        participant2_name: Option<String>,
        group_members: Vec<String>,
    ) -> Result<Self, DomainError> {
        match dance_type {
            DanceType::Solo => Ok(Self::Solo),
            DanceType::Duo => {
                let first = non_blank(participant1_name).ok_or(DomainError::DuoParticipantsRequired)?;
                let second = non_blank(participant2_name).ok_or(DomainError::DuoParticipantsRequired)?;
                Ok(Self::Duo { first, second })
            }
            DanceType::Group => {
                let members: Vec<String> = group_members
                    .into_iter()
                    .filter_map(|name| non_blank(Some(name)))
                    .collect();
                if !(GROUP_MIN_MEMBERS..=GROUP_MAX_MEMBERS).contains(&members.len()) {
                    return Err(DomainError::GroupSize(members.len()));
                }
                Ok(Self::Group { members })
            }
        }
    }

    pub fn dance_type(&self) -> DanceType {
        match self {
            Self::Solo => DanceType::Solo,
            Self::Duo { .. } => DanceType::Duo,
            Self::Group { .. } => DanceType::Group,
        }
    }

    /// Number of dancers on stage.
    pub fn head_count(&self) -> usize {
        match self {
            Self::Solo => 1,
            Self::Duo { .. } => 2,
            Self::Group { members } => members.len(),
        }
    }

    pub fn duo_names(&self) -> Option<(&str, &str)> {
        match self {
            Self::Duo { first, second } => Some((first, second)),
            _ => None,
        }
    }

    pub fn group_members(&self) -> Option<&[String]> {
        match self {
            Self::Group { members } => Some(members),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUrl(String);

impl VideoUrl {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let value = value.trim();
        let has_host = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host || value.contains(char::is_whitespace) {
            return Err(DomainError::InvalidVideoUrl);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalInfo {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub age: u32,
    pub gender: Gender,
    pub address: String,
    pub mobile: String,
    pub alternate_mobile: Option<String>,
    /// always lower-cased
    pub email: String,
    pub school_college: String,
    pub teacher_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionEntry {
    pub age_group: AgeGroup,
    pub theme: Theme,
    pub category: DanceCategory,
    pub participants: Participants,
}

impl CompetitionEntry {
    pub fn dance_type(&self) -> DanceType {
        self.participants.dance_type()
    }
}

/// Raw registration payload as submitted by the wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub alternate_mobile: Option<String>,
    pub email: Option<String>,
    pub school_college: Option<String>,
    pub teacher_name: Option<String>,
    pub dance_type: Option<String>,
    pub age_group: Option<String>,
    pub theme: Option<String>,
    pub category: Option<String>,
    pub participant1_name: Option<String>,
    pub participant2_name: Option<String>,
    pub group_members: Vec<String>,
    pub video_url: Option<String>,
}

/// A registration that passed every wizard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationApplication {
    pub personal: PersonalInfo,
    pub entry: CompetitionEntry,
    pub video_url: VideoUrl,
}

impl RegistrationApplication {
    /// Validate a submitted form. `today` fixes the date the age is computed on.
    pub fn from_form(form: RegistrationForm, today: NaiveDate) -> Result<Self, DomainError> {
        // personal info step
        let name = required(form.name, "name")?;
        let date_of_birth = required(form.date_of_birth, "date_of_birth")?;
        let gender = required(form.gender, "gender")?;
        let mobile = required(form.mobile, "mobile")?;
        let email = required(form.email, "email")?;
        let school_college = required(form.school_college, "school_college")?;
        let address = required(form.address, "address")?;

        let date_of_birth = NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d")
            .map_err(|_| DomainError::InvalidDateOfBirth)?;
        let age = age_on(date_of_birth, today).ok_or(DomainError::InvalidDateOfBirth)?;
        let email = normalize_email(&email)?;

        let personal = PersonalInfo {
            name,
            date_of_birth,
            age,
            gender: gender.parse()?,
            address,
            mobile,
            alternate_mobile: non_blank(form.alternate_mobile),
            email,
            school_college,
            teacher_name: non_blank(form.teacher_name),
        };

        // category and video step
        let dance_type: DanceType = required(form.dance_type, "dance_type")?.parse()?;
        let age_group: AgeGroup = required(form.age_group, "age_group")?.parse()?;
        let theme: Theme = required(form.theme, "theme")?.parse()?;
        let category: DanceCategory = required(form.category, "category")?.parse()?;
        let video_url = VideoUrl::new(required(form.video_url, "video_url")?)?;

        let participants = Participants::new(
            dance_type,
            form.participant1_name,
            form.participant2_name,
            form.group_members,
        )?;

        Ok(Self {
            personal,
            entry: CompetitionEntry {
                age_group,
                theme,
                category,
                participants,
            },
            video_url,
        })
    }
}

/// Whole years between `date_of_birth` and `today`, `None` for a future birth date.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(date_of_birth)
}

pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(DomainError::InvalidEmail),
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DomainError> {
    non_blank(value).ok_or(DomainError::MissingField(field))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

use crate::{Sex, StudentPayload};

/// Fields of the student form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudentField {
    Name,
    Sex,
    Class,
    Age,
    Siblings,
    Gpa,
}

/// A single validation failure on the student form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    NameRequired,
    InvalidSex,
    ClassRequired,
    ClassNotPositive,
    AgeRequired,
    AgeNotPositive,
    SiblingsRequired,
    SiblingsNegative,
    GpaRequired,
    GpaNegative,
}

impl FieldError {
    pub fn field(&self) -> StudentField {
        match self {
            Self::NameRequired => StudentField::Name,
            Self::InvalidSex => StudentField::Sex,
            Self::ClassRequired | Self::ClassNotPositive => StudentField::Class,
            Self::AgeRequired | Self::AgeNotPositive => StudentField::Age,
            Self::SiblingsRequired | Self::SiblingsNegative => {
                StudentField::Siblings
            }
            Self::GpaRequired | Self::GpaNegative => StudentField::Gpa,
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Self::NameRequired => "Name is required",
            Self::InvalidSex => "Sex must be M or F",
            Self::ClassRequired => "Class is required",
            Self::ClassNotPositive => "Class must be a positive number",
            Self::AgeRequired => "Age is required",
            Self::AgeNotPositive => "Age must be a positive number",
            Self::SiblingsRequired => "Siblings is required",
            Self::SiblingsNegative => "Siblings must be 0 or more",
            Self::GpaRequired => "GPA is required",
            Self::GpaNegative => "GPA must be 0 or more",
        }
    }
}

/// Raw student form input.
///
/// Numeric fields are kept as strings so an input can be left blank while
/// the user is typing; conversion happens on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentForm {
    pub class: String,
    pub name: String,
    pub sex: String,
    pub age: String,
    pub siblings: String,
    pub gpa: String,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            class: String::new(),
            name: String::new(),
            sex: Sex::M.to_string(),
            age: String::new(),
            siblings: String::new(),
            gpa: String::new(),
        }
    }
}

impl StudentForm {
    /// Seed the form from an existing record, for editing.
    pub fn from_payload(payload: &StudentPayload) -> Self {
        Self {
            class: payload.class.to_string(),
            name: payload.name.clone(),
            sex: payload.sex.to_string(),
            age: payload.age.to_string(),
            siblings: payload.siblings.to_string(),
            gpa: payload.gpa.to_string(),
        }
    }

    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::Sex => &self.sex,
            StudentField::Class => &self.class,
            StudentField::Age => &self.age,
            StudentField::Siblings => &self.siblings,
            StudentField::Gpa => &self.gpa,
        }
    }

    pub fn set(&mut self, field: StudentField, value: String) {
        let slot = match field {
            StudentField::Name => &mut self.name,
            StudentField::Sex => &mut self.sex,
            StudentField::Class => &mut self.class,
            StudentField::Age => &mut self.age,
            StudentField::Siblings => &mut self.siblings,
            StudentField::Gpa => &mut self.gpa,
        };
        *slot = value;
    }

    /// Validate every field, returning failures in display order.
    pub fn validate(&self) -> Vec<FieldError> {
        self.parse().err().unwrap_or_default()
    }

    /// Convert to an API payload, or return every failing field.
    pub fn parse(&self) -> Result<StudentPayload, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::NameRequired);
        }

        let sex = self.sex.parse::<Sex>().ok();
        if sex.is_none() {
            errors.push(FieldError::InvalidSex);
        }

        let class = parse_count(
            &self.class,
            1,
            FieldError::ClassRequired,
            FieldError::ClassNotPositive,
        )
        .map_err(|e| errors.push(e))
        .ok();

        let age = parse_count(
            &self.age,
            1,
            FieldError::AgeRequired,
            FieldError::AgeNotPositive,
        )
        .map_err(|e| errors.push(e))
        .ok();

        let siblings = parse_count(
            &self.siblings,
            0,
            FieldError::SiblingsRequired,
            FieldError::SiblingsNegative,
        )
        .map_err(|e| errors.push(e))
        .ok();

        let gpa = parse_gpa(&self.gpa).map_err(|e| errors.push(e)).ok();

        match (sex, class, age, siblings, gpa) {
            (Some(sex), Some(class), Some(age), Some(siblings), Some(gpa))
                if errors.is_empty() =>
            {
                Ok(StudentPayload {
                    class,
                    name: name.to_string(),
                    sex,
                    age,
                    siblings,
                    gpa,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_count(
    input: &str,
    min: i64,
    required: FieldError,
    out_of_range: FieldError,
) -> Result<i64, FieldError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(required);
    }
    match input.parse::<i64>() {
        Ok(value) if value >= min => Ok(value),
        _ => Err(out_of_range),
    }
}

fn parse_gpa(input: &str) -> Result<f64, FieldError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FieldError::GpaRequired);
    }
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(FieldError::GpaNegative),
    }
}

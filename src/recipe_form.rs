//! Recipe Authoring Form
//!
//! Draft state of the add-recipe card and its multi-part encoding.
//! Generic over the file handle so the encoding is testable without a browser.

use serde::Serialize;

/// A picked image plus its local preview URL
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment<F> {
    pub file: F,
    pub preview_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepDraft<F> {
    pub description: String,
    pub image: Option<Attachment<F>>,
}

impl<F> Default for StepDraft<F> {
    fn default() -> Self {
        Self {
            description: String::new(),
            image: None,
        }
    }
}

/// One field of a multi-part body
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart<F> {
    Text { name: String, value: String },
    File { name: String, file: F },
}

impl<F> FormPart<F> {
    fn text(name: &str, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFormError {
    MissingTitle,
    MissingIngredients,
}

impl std::fmt::Display for RecipeFormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeFormError::MissingTitle => write!(f, "레시피 제목을 입력해주세요."),
            RecipeFormError::MissingIngredients => write!(f, "재료를 입력해주세요."),
        }
    }
}

impl std::error::Error for RecipeFormError {}

#[derive(Serialize)]
struct StepJson<'a> {
    step_no: usize,
    description: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm<F> {
    pub title: String,
    pub cook_time_min: String,
    /// Comma-separated ingredient names
    pub ingredients: String,
    pub is_public: bool,
    pub thumbnail: Option<Attachment<F>>,
    /// Never empty
    pub steps: Vec<StepDraft<F>>,
}

impl<F> Default for RecipeForm<F> {
    fn default() -> Self {
        Self {
            title: String::new(),
            cook_time_min: String::new(),
            ingredients: String::new(),
            is_public: true,
            thumbnail: None,
            steps: vec![StepDraft::default()],
        }
    }
}

impl<F: Clone> RecipeForm<F> {
    pub fn add_step(&mut self) {
        self.steps.push(StepDraft::default());
    }

    /// Remove a step, keeping at least one
    pub fn remove_step(&mut self, index: usize) {
        if self.steps.len() > 1 && index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    pub fn validate(&self) -> Result<(), RecipeFormError> {
        if self.title.trim().is_empty() {
            return Err(RecipeFormError::MissingTitle);
        }
        if self.ingredients.trim().is_empty() {
            return Err(RecipeFormError::MissingIngredients);
        }
        Ok(())
    }

    /// Steps that will be submitted (blank descriptions dropped)
    fn submitted_steps(&self) -> impl Iterator<Item = &StepDraft<F>> {
        self.steps.iter().filter(|s| !s.description.trim().is_empty())
    }

    /// Encode as multi-part fields.
    ///
    /// Steps travel as `steps_json` (number and description only); each
    /// step image is a separate `step_image_{index}` field keyed by the
    /// step's position among submitted steps.
    pub fn to_parts(&self) -> Result<Vec<FormPart<F>>, RecipeFormError> {
        self.validate()?;

        let steps: Vec<&StepDraft<F>> = self.submitted_steps().collect();
        let steps_json: Vec<StepJson<'_>> = steps
            .iter()
            .enumerate()
            .map(|(i, s)| StepJson {
                step_no: i + 1,
                description: &s.description,
            })
            .collect();
        let steps_json = serde_json::to_string(&steps_json).unwrap_or_else(|_| "[]".to_string());

        let mut parts = vec![
            FormPart::text("title", self.title.trim()),
            FormPart::text("cook_time_min", self.cook_time_min.trim()),
            FormPart::text("ingredients", self.ingredients.trim()),
            FormPart::text("is_public", if self.is_public { "true" } else { "false" }),
            FormPart::text("steps_json", steps_json),
        ];

        if let Some(thumb) = &self.thumbnail {
            parts.push(FormPart::File {
                name: "thumbnail".to_string(),
                file: thumb.file.clone(),
            });
        }

        for (index, step) in steps.iter().enumerate() {
            if let Some(image) = &step.image {
                parts.push(FormPart::File {
                    name: format!("step_image_{}", index),
                    file: image.file.clone(),
                });
            }
        }

        Ok(parts)
    }
}

//! Pantry Screen Logic
//!
//! Every mutation reloads the list and bumps the pantry revision so the
//! recommend screen refetches.

use leptos::prelude::*;

use crate::api::Backend;
use crate::context::AppContext;
use crate::models::{NewPantryItem, PantryItem, PantryPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Piece,
    Gram,
    Milliliter,
    Tablespoon,
    Teaspoon,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Piece,
        Unit::Gram,
        Unit::Milliliter,
        Unit::Tablespoon,
        Unit::Teaspoon,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Piece => "개",
            Unit::Gram => "g",
            Unit::Milliliter => "ml",
            Unit::Tablespoon => "큰술",
            Unit::Teaspoon => "작은술",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Unit> {
        Self::ALL.into_iter().find(|u| u.suffix() == suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PantryFormError {
    MissingName,
    MissingAmount,
}

impl std::fmt::Display for PantryFormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PantryFormError::MissingName => write!(f, "재료 이름을 입력해주세요."),
            PantryFormError::MissingAmount => write!(f, "수량을 입력해주세요."),
        }
    }
}

impl std::error::Error for PantryFormError {}

/// Add-item form buffer
#[derive(Debug, Clone, PartialEq)]
pub struct PantryDraft {
    pub name: String,
    pub amount: String,
    pub unit: Option<Unit>,
    /// `YYYY-MM-DD` or blank
    pub expires_at: String,
}

impl Default for PantryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            unit: Some(Unit::default()),
            expires_at: String::new(),
        }
    }
}

impl PantryDraft {
    pub fn to_new_item(&self) -> Result<NewPantryItem, PantryFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PantryFormError::MissingName);
        }
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(PantryFormError::MissingAmount);
        }
        let quantity_text = match self.unit {
            Some(unit) => format!("{}{}", amount, unit.suffix()),
            None => amount.to_string(),
        };
        Ok(NewPantryItem {
            ingredient_name: name.to_string(),
            quantity_text,
            expires_at: blank_to_none(&self.expires_at),
        })
    }

    /// Fresh draft after a successful add; the unit choice is kept
    pub fn cleared(&self) -> Self {
        Self {
            unit: self.unit,
            ..Self::default()
        }
    }
}

/// Build an inline-edit patch; blank quantity is rejected
pub fn edit_patch(quantity_text: &str, expires_at: &str) -> Result<PantryPatch, PantryFormError> {
    let quantity_text = quantity_text.trim();
    if quantity_text.is_empty() {
        return Err(PantryFormError::MissingAmount);
    }
    Ok(PantryPatch {
        quantity_text: quantity_text.to_string(),
        expires_at: blank_to_none(expires_at),
    })
}

fn blank_to_none(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn expiry_suffix(item: &PantryItem) -> Option<String> {
    item.expires_at
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("~{}", d))
}

#[derive(Debug, Clone, Default)]
pub struct PantryState {
    pub items: Vec<PantryItem>,
    pub loading: bool,
    /// Last load failure, cleared by the next load
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
pub struct PantryController<B> {
    backend: B,
    state: RwSignal<PantryState>,
    ctx: AppContext,
}

impl<B: Backend> PantryController<B> {
    pub fn new(backend: B, state: RwSignal<PantryState>, ctx: AppContext) -> Self {
        Self { backend, state, ctx }
    }

    pub async fn load(&self) {
        self.state.try_update(|s| {
            s.loading = true;
            s.error = None;
        });
        let result = self.backend.pantry().await;
        self.state.try_update(|s| {
            s.loading = false;
            match result {
                Ok(items) => {
                    log::info!("[Pantry] Loaded {} items", items.len());
                    s.items = items;
                }
                Err(err) => {
                    log::error!("[Pantry] Load failed: {}", err);
                    s.error = Some(err.to_string());
                }
            }
        });
    }

    /// Validate and submit the draft. Errors are user-facing messages.
    pub async fn add(&self, draft: &PantryDraft) -> Result<(), String> {
        let item = draft.to_new_item().map_err(|e| e.to_string())?;
        self.backend.add_pantry_item(&item).await.map_err(|e| {
            log::error!("[Pantry] Add failed: {}", e);
            e.to_string()
        })?;
        self.reconcile().await;
        Ok(())
    }

    pub async fn update(&self, id: u32, patch: PantryPatch) -> Result<(), String> {
        self.backend.update_pantry_item(id, &patch).await.map_err(|e| {
            log::error!("[Pantry] Update {} failed: {}", id, e);
            e.to_string()
        })?;
        self.reconcile().await;
        Ok(())
    }

    pub async fn delete(&self, id: u32) -> Result<(), String> {
        self.backend.delete_pantry_item(id).await.map_err(|e| {
            log::error!("[Pantry] Delete {} failed: {}", id, e);
            e.to_string()
        })?;
        self.reconcile().await;
        Ok(())
    }

    async fn reconcile(&self) {
        self.load().await;
        self.ctx.bump_pantry();
    }
}

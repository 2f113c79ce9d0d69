/// Why a modal closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalRole {
    Save,
    Delete,
    Cancel,
}

/// Result handed back to whoever opened a modal.
#[derive(Debug, Clone, PartialEq)]
pub struct Dismissal<T> {
    pub data: Option<T>,
    pub role: ModalRole,
}

impl<T> Dismissal<T> {
    pub fn save(data: T) -> Self {
        Self {
            data: Some(data),
            role: ModalRole::Save,
        }
    }

    pub fn delete() -> Self {
        Self {
            data: None,
            role: ModalRole::Delete,
        }
    }

    pub fn cancel() -> Self {
        Self {
            data: None,
            role: ModalRole::Cancel,
        }
    }

    /// Save and delete both change server state, so the opener's list is stale.
    pub fn refreshes_list(&self) -> bool {
        matches!(self.role, ModalRole::Save | ModalRole::Delete)
    }
}

/// What a key press inside a modal asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Save,
    Delete,
    Cancel,
    OpenCategoryModal,
}

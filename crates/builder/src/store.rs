//! The Builder State Store.
//!
//! Owns the single in-progress [`PassDraft`] and lets callers observe every
//! successful change through [`BuilderStore::subscribe`]. The store itself
//! performs no I/O; persistence is just another listener registered by
//! whoever builds the store (see [`crate::persistence`]).

use std::fmt;

use rust_decimal::Decimal;
use serde_json::Value;

use passly_core::{
    DraftField, HydrateReport, OffersFrequency, PassCategory, PassDraft, PayloadError,
    ValidationError,
};

/// Callback invoked with the draft after each successful change.
pub type Listener = Box<dyn Fn(&PassDraft) + Send + Sync>;

/// Handle returned by [`BuilderStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Generates store mutators that forward to the draft's validated setter and
/// notify listeners only when the setter succeeds.
macro_rules! forward_setters {
    ($($(#[$meta:meta])* $name:ident($ty:ty);)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Returns the draft's [`ValidationError`]; listeners are not
            /// notified in that case.
            pub fn $name(&mut self, value: $ty) -> Result<(), ValidationError> {
                self.draft.$name(value)?;
                self.notify();
                Ok(())
            }
        )*
    };
}

/// Holds the draft and its subscribers.
pub struct BuilderStore {
    draft: PassDraft,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for BuilderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderStore")
            .field("draft", &self.draft)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for BuilderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderStore {
    /// Create a store holding the default snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::with_draft(PassDraft::default())
    }

    /// Create a store around an existing draft (e.g. one loaded from storage).
    #[must_use]
    pub const fn with_draft(draft: PassDraft) -> Self {
        Self {
            draft,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current draft.
    #[must_use]
    pub const fn draft(&self) -> &PassDraft {
        &self.draft
    }

    /// Register a listener for successful changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&PassDraft) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.draft);
        }
    }

    forward_setters! {
        /// Set the campaign name.
        set_campaign_name(&str);
        /// Set the brand color.
        set_brand_color(&str);
        /// Set or clear the logo reference.
        set_logo_url(Option<&str>);
        /// Set the tagline.
        set_tagline(&str);
        /// Set the reward description.
        set_reward_description(&str);
        /// Set the number of stamps needed for a reward.
        set_stamps_needed(i64);
        /// Set the minimum purchase amount.
        set_min_purchase(Decimal);
        /// Set the business name.
        set_business_name(&str);
        /// Set the business address.
        set_business_address(&str);
        /// Set the contact phone number.
        set_contact(&str);
        /// Set the contact email.
        set_email(&str);
        /// Set the business website.
        set_website(&str);
        /// Set the social media handles.
        set_social_media(&str);
        /// Set the welcome message.
        set_welcome_message(&str);
        /// Set the usage instructions.
        set_instructions(&str);
        /// Set the special offers text.
        set_special_offers(&str);
    }

    /// Set the pass category.
    pub fn set_pass_type(&mut self, value: PassCategory) {
        self.draft.set_pass_type(value);
        self.notify();
    }

    /// Set how often offers are sent.
    pub fn set_offers_frequency(&mut self, value: OffersFrequency) {
        self.draft.set_offers_frequency(value);
        self.notify();
    }

    /// Set a field from a JSON value.
    ///
    /// # Errors
    ///
    /// See [`PassDraft::set_field`].
    pub fn set_field(&mut self, field: DraftField, value: &Value) -> Result<(), ValidationError> {
        self.draft.set_field(field, value)?;
        self.notify();
        Ok(())
    }

    /// Merge a persisted snapshot. Listeners are notified if anything was
    /// applied.
    ///
    /// # Errors
    ///
    /// See [`PassDraft::hydrate`].
    pub fn hydrate(&mut self, payload: &Value) -> Result<HydrateReport, PayloadError> {
        let report = self.draft.hydrate(payload)?;
        if !report.applied.is_empty() {
            self.notify();
        }
        Ok(report)
    }

    /// Apply a form submission atomically.
    ///
    /// # Errors
    ///
    /// See [`PassDraft::apply_patch`].
    pub fn apply_patch(&mut self, payload: &Value) -> Result<Vec<DraftField>, PayloadError> {
        let applied = self.draft.apply_patch(payload)?;
        if !applied.is_empty() {
            self.notify();
        }
        Ok(applied)
    }

    /// Reset every field to the default snapshot.
    pub fn clear(&mut self) {
        self.draft.reset();
        self.notify();
    }

    /// Mark the draft as published.
    pub fn publish(&mut self) {
        self.draft.publish();
        self.notify();
    }

    /// Mark the draft as archived.
    pub fn archive(&mut self) {
        self.draft.archive();
        self.notify();
    }
}

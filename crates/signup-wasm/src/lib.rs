//! Signup Form WASM
//!
//! WebAssembly bindings for the signup form.
//! The page wires DOM events to [`SignupFormHandle`] and receives display
//! updates through four JavaScript callbacks; all formatting and validation
//! happens in `signup-engine`.

use js_sys::{Function, Reflect};
use serde::Serialize;
use signup_engine::{
    ConfirmationPrompt, ErrorPresenter, FieldFeedback, FieldId, FieldRules, FormConfig,
    PendingSubmission, SignupForm, SubmitAttempt, SubmitGate,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Presenter backed by JavaScript callbacks
struct JsPresenter {
    show_field: Function,
    clear_all: Function,
    set_submit_enabled: Function,
    confirm: Function,
}

impl JsPresenter {
    /// Pull the four callbacks out of a JS object
    fn from_callbacks(callbacks: &JsValue) -> Result<Self, JsValue> {
        Ok(Self {
            show_field: callback(callbacks, "showField")?,
            clear_all: callback(callbacks, "clearAll")?,
            set_submit_enabled: callback(callbacks, "setSubmitEnabled")?,
            confirm: callback(callbacks, "confirm")?,
        })
    }
}

fn callback(callbacks: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(callbacks, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("Missing callback: {}", name)))
}

// A throwing callback must not abort the engine update; report and go on
fn report(name: &str, result: Result<JsValue, JsValue>) {
    if let Err(e) = result {
        web_sys::console::error_2(&JsValue::from_str(&format!("{} callback failed:", name)), &e);
    }
}

impl ErrorPresenter for JsPresenter {
    fn show_field(&mut self, field: &FieldId, feedback: &FieldFeedback) {
        let message = feedback
            .message
            .as_deref()
            .map(JsValue::from_str)
            .unwrap_or(JsValue::NULL);
        report(
            "showField",
            self.show_field.call3(
                &JsValue::NULL,
                &JsValue::from_str(field.as_str()),
                &message,
                &JsValue::from_str(feedback.border.css_color()),
            ),
        );
    }

    fn clear_all(&mut self) {
        report("clearAll", self.clear_all.call0(&JsValue::NULL));
    }
}

impl SubmitGate for JsPresenter {
    fn set_submit_enabled(&mut self, enabled: bool) {
        report(
            "setSubmitEnabled",
            self.set_submit_enabled
                .call1(&JsValue::NULL, &JsValue::from_bool(enabled)),
        );
    }
}

impl ConfirmationPrompt for JsPresenter {
    fn confirm(&mut self, title: &str, message: &str) {
        report(
            "confirm",
            self.confirm.call2(
                &JsValue::NULL,
                &JsValue::from_str(title),
                &JsValue::from_str(message),
            ),
        );
    }
}

/// One form on the page
///
/// # Example (JavaScript)
/// ```javascript
/// const form = new SignupFormHandle({
///     showField: (id, message, color) => { ... },
///     clearAll: () => { ... },
///     setSubmitEnabled: (enabled) => { submitButton.disabled = !enabled; },
///     confirm: (title, message) => modal.show(),
/// }, { rules: { code_suffix: "upper" } });
///
/// input.addEventListener('input', () => { input.value = form.input(input.id, input.value); });
/// modalEl.addEventListener('hidden.bs.modal', () => {
///     const values = form.confirmationDismissed();
///     if (values) htmlForm.submit();
/// });
/// ```
#[wasm_bindgen]
pub struct SignupFormHandle {
    form: SignupForm<JsPresenter>,
    pending: Option<PendingSubmission>,
}

impl SignupFormHandle {
    fn with_config(callbacks: &JsValue, config: &FormConfig) -> Result<SignupFormHandle, JsValue> {
        let presenter = JsPresenter::from_callbacks(callbacks)?;
        Ok(SignupFormHandle {
            form: SignupForm::from_config(config, presenter),
            pending: None,
        })
    }
}

#[wasm_bindgen]
impl SignupFormHandle {
    /// Create a form from callbacks and an optional configuration object
    #[wasm_bindgen(constructor)]
    pub fn new(callbacks: JsValue, config: JsValue) -> Result<SignupFormHandle, JsValue> {
        let config: FormConfig = if config.is_undefined() || config.is_null() {
            FormConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };
        Self::with_config(&callbacks, &config)
    }

    /// Create a form from callbacks and a `signup.toml` document
    #[wasm_bindgen(js_name = fromToml)]
    pub fn from_toml(callbacks: JsValue, toml: &str) -> Result<SignupFormHandle, JsValue> {
        let config = FormConfig::from_toml(toml)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {:#}", e)))?;
        Self::with_config(&callbacks, &config)
    }

    /// Focus event. Returns whether the field is currently valid.
    pub fn focus(&mut self, field_id: &str) -> bool {
        self.form.focus(&FieldId::from(field_id)).is_valid()
    }

    /// Input event. Returns the formatted value to write back into the input.
    pub fn input(&mut self, field_id: &str, raw: &str) -> String {
        self.form.input(&FieldId::from(field_id), raw).value
    }

    /// Submit event. Returns true when the confirmation dialog was opened.
    pub fn submit(&mut self) -> bool {
        match self.form.submit() {
            SubmitAttempt::Blocked(_) => false,
            SubmitAttempt::Confirming(pending) => {
                self.pending = Some(pending);
                true
            }
        }
    }

    /// The confirmation dialog closed. Returns the values to post the first
    /// time after a successful submit, `null` otherwise.
    #[wasm_bindgen(js_name = confirmationDismissed)]
    pub fn confirmation_dismissed(&mut self) -> Result<JsValue, JsValue> {
        match self.pending.take() {
            Some(pending) => Ok(serde_wasm_bindgen::to_value(&pending.dismiss())?),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.form.reset();
    }

    /// Ids of the fields currently invalid
    pub fn errors(&self) -> Vec<String> {
        self.form
            .engine()
            .errors()
            .iter()
            .map(|f| f.to_string())
            .collect()
    }

    #[wasm_bindgen(js_name = submitEnabled)]
    pub fn submit_enabled(&self) -> bool {
        self.form.engine().submit_enabled()
    }
}

/// Result of a one-off field check
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FieldCheck {
    pub value: String,
    pub valid: bool,
    pub message: Option<String>,
}

/// Format and validate a single value with the default rules
pub fn check_field(field_id: &str, value: &str) -> FieldCheck {
    let rules = FieldRules::default();
    let rule = rules.rule_for(&FieldId::from(field_id));
    let value = rule.transform(value);
    let result = rule.validate(&value);
    FieldCheck {
        valid: result.is_valid(),
        message: result.message().map(str::to_string),
        value,
    }
}

/// Quick field check without a form instance
///
/// # Example (JavaScript)
/// ```javascript
/// const { value, valid, message } = validateField('dateNaissance', '29022024');
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field_js(field_id: &str, value: &str) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(&check_field(field_id, value))?)
}

/// Apply the `jj/mm/aaaa` input mask
#[wasm_bindgen(js_name = maskDate)]
pub fn mask_date_js(raw: &str) -> String {
    signup_validation::mask_date(raw)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    signup_validation::is_valid_email(email)
}

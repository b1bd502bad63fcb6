//! formguard WASM
//!
//! WebAssembly bindings for formguard. The page script reads its inputs into
//! plain descriptor objects and asks the validator for verdicts; the same
//! rules run here as on the server.

use formguard::{ConfigError, FieldDescriptor, FieldEvaluator, RuleSpec, Verdict};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Options accepted by the `FormValidator` constructor
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorOptions {
    #[serde(default)]
    pub empty_values: Vec<String>,

    /// Extra `{ name, pattern }` rules, merged over the built-ins
    #[serde(default)]
    pub validators: Vec<RuleSpec>,
}

/// Result for one field, returned to JavaScript
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldResult {
    pub id: String,
    pub name: String,
    /// Absent when the field is misconfigured
    pub verdict: Option<Verdict>,
    /// Text for the field's message container; absent on success
    pub message: Option<String>,
    /// Configuration error, for the developer console
    pub error: Option<String>,
}

impl FieldResult {
    pub fn passed(&self) -> bool {
        self.verdict == Some(Verdict::Success)
    }
}

/// Result for a whole form
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FormResult {
    pub valid: bool,
    pub fields: Vec<FieldResult>,
}

/// Field validator exposed to JavaScript
///
/// # Example (JavaScript)
/// ```javascript
/// const validator = new FormValidator({ emptyValues: ["--"] });
/// const result = validator.validateField({
///     id: "email", name: "email", value: "user@example.com",
///     required: true, format: "email",
/// });
/// // result.verdict === "success"
/// ```
#[wasm_bindgen]
pub struct FormValidator {
    evaluator: FieldEvaluator,
}

impl FormValidator {
    pub fn from_options(options: &ValidatorOptions) -> Result<Self, ConfigError> {
        let custom = options
            .validators
            .iter()
            .map(RuleSpec::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let evaluator = FieldEvaluator::new(formguard::RuleRegistry::builtin())
            .with_rules(custom)
            .with_empty_values(options.empty_values.iter().cloned());

        Ok(Self { evaluator })
    }

    pub fn check_field(&self, field: &FieldDescriptor) -> FieldResult {
        match self.evaluator.evaluate(field) {
            Ok(verdict) => FieldResult {
                id: field.id.clone(),
                name: field.name.clone(),
                verdict: Some(verdict),
                message: (!verdict.is_success()).then(|| field.message_for(verdict).to_string()),
                error: None,
            },
            Err(e) => {
                report_config_error(&e);
                FieldResult {
                    id: field.id.clone(),
                    name: field.name.clone(),
                    verdict: None,
                    message: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn check_form(&self, fields: &[FieldDescriptor]) -> FormResult {
        let fields: Vec<FieldResult> = fields.iter().map(|field| self.check_field(field)).collect();
        FormResult {
            valid: fields.iter().all(FieldResult::passed),
            fields,
        }
    }
}

#[wasm_bindgen]
impl FormValidator {
    /// Create a validator; `options` may be omitted
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<FormValidator, JsValue> {
        let options: ValidatorOptions = if options.is_undefined() || options.is_null() {
            ValidatorOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?
        };

        Self::from_options(&options).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Validate a single field descriptor
    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&self, field: JsValue) -> Result<JsValue, JsValue> {
        let field: FieldDescriptor = serde_wasm_bindgen::from_value(field)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse field: {}", e)))?;

        Ok(serde_wasm_bindgen::to_value(&self.check_field(&field))?)
    }

    /// Validate every field descriptor of a form
    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self, fields: JsValue) -> Result<JsValue, JsValue> {
        let fields: Vec<FieldDescriptor> = serde_wasm_bindgen::from_value(fields)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse fields: {}", e)))?;

        Ok(serde_wasm_bindgen::to_value(&self.check_form(&fields))?)
    }

    /// Names of every registered format rule
    #[wasm_bindgen(js_name = ruleNames)]
    pub fn rule_names(&self) -> Vec<String> {
        self.evaluator
            .registry()
            .names()
            .map(str::to_string)
            .collect()
    }
}

/// Quick check of a value against a built-in format rule
#[wasm_bindgen(js_name = matchesFormat)]
pub fn matches_format(rule: &str, value: &str) -> Option<bool> {
    formguard::RuleRegistry::builtin()
        .find(rule)
        .map(|rule| rule.test(value.trim()))
}

#[cfg(target_arch = "wasm32")]
fn report_config_error(error: &ConfigError) {
    web_sys::console::error_1(&JsValue::from_str(&error.to_string()));
}

#[cfg(not(target_arch = "wasm32"))]
fn report_config_error(_error: &ConfigError) {}

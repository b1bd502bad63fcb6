//! Built-in format rules, checked through the evaluator the way forms use them

use formguard::{FieldDescriptor, FieldEvaluator, RuleRegistry, Verdict};
use rstest::rstest;

fn check(rule: &str, value: &str) -> Verdict {
    let evaluator = FieldEvaluator::new(RuleRegistry::builtin());
    let field = FieldDescriptor::text(rule).with_value(value).with_format(rule);
    evaluator.evaluate(&field).unwrap()
}

#[rstest]
#[case("email", "user@example.com")]
#[case("email", "first.last+tag@mail.example.co.uk")]
#[case("tel", "514-555-1234")]
#[case("tel", "(514) 555 1234")]
#[case("tel", "+5145551234")]
#[case("postal-code", "H2X 1Y4")]
#[case("postal-code", "h2x1y4")]
#[case("alpha", "Montreal")]
#[case("text", "Zoë O'Neil")]
#[case("text", "Jean-François Côté")]
#[case("numeric", "123 456")]
#[case("alphanumeric", "Unit 4B")]
#[case("alphanumeric-extended", "Saint-Jérôme2")]
#[case("address", "123 Main Street")]
#[case("address", "12B-14 Rue Saint-Denis")]
#[case("url", "https://www.example.com")]
#[case("url", "example.org/path?q=1")]
fn test_builtin_rule_accepts(#[case] rule: &str, #[case] value: &str) {
    assert_eq!(check(rule, value), Verdict::Success, "{rule} should accept {value:?}");
}

#[rstest]
#[case("email", "user@@example")]
#[case("email", "user@example")]
#[case("email", "no-at-sign.example.com")]
#[case("tel", "555-12")]
#[case("tel", "phone me")]
#[case("postal-code", "D2X 1Y4")]
#[case("postal-code", "12345")]
#[case("alpha", "Montréal")]
#[case("alpha", "abc1")]
#[case("text", "R2-D2")]
#[case("numeric", "12a")]
#[case("alphanumeric", "hello!")]
#[case("alphanumeric-extended", "two words")]
#[case("address", "Main Street")]
#[case("url", "not a url")]
#[case("url", "localhost")]
fn test_builtin_rule_rejects(#[case] rule: &str, #[case] value: &str) {
    assert_eq!(check(rule, value), Verdict::Failed, "{rule} should reject {value:?}");
}

/// Translate a logical camelCase field name into a physical snake_case
/// column name. Deterministic, pure, and total: every column and parameter
/// name the compiler emits goes through here.
///
/// An underscore is inserted before an uppercase letter at a camelCase
/// boundary (`userId` → `user_id`) and at an acronym-to-word boundary, i.e.
/// before the last letter of an uppercase run that is immediately followed
/// by a lowercase letter (`XMLParser` → `xml_parser`). A trailing uppercase
/// run folds to lowercase without internal underscores (`fileURL` →
/// `file_url`). Existing underscores pass through, so snake_case input is a
/// fixed point.
pub fn to_column_name(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            out.push('_');
            continue;
        }
        if c.is_uppercase() {
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let prev_is_upper = i > 0 && chars[i - 1].is_uppercase();
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev_is_lower || (prev_is_upper && next_is_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub mod contact_repository;
pub mod spam_repository;
pub mod token_repository;
pub mod user_repository;

pub use contact_repository::ContactRepository;
pub use spam_repository::SpamRepository;
pub use token_repository::RevokedTokenRepository;
pub use user_repository::UserRepository;

/// Builds a `%query%` LIKE pattern, escaping wildcards with `\`.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

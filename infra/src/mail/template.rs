//! Embedded HTML bodies

const VERIFY_EMAIL: &str = include_str!("templates/verify_email.html");
const RESET_PASSWORD: &str = include_str!("templates/reset_password.html");

/// Emails the application sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    Verification,
    ResetPassword,
}

impl EmailKind {
    pub fn subject(&self) -> &'static str {
        match self {
            EmailKind::Verification => "Darah Connect : Verifikasi Email!",
            EmailKind::ResetPassword => "Darah Connect : Reset Password!",
        }
    }

    /// Frontend page that consumes the token
    pub fn link(&self, app_base_url: &str, token: &str) -> String {
        let path = match self {
            EmailKind::Verification => "verify-email",
            EmailKind::ResetPassword => "reset-password",
        };
        format!("{}/{}/{}", app_base_url.trim_end_matches('/'), path, token)
    }

    pub fn render(&self, app_base_url: &str, name: &str, token: &str) -> String {
        let template = match self {
            EmailKind::Verification => VERIFY_EMAIL,
            EmailKind::ResetPassword => RESET_PASSWORD,
        };
        template
            .replace("{{name}}", &escape_html(name))
            .replace("{{link}}", &self.link(app_base_url, token))
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

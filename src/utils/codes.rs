use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of checking a submitted verification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    /// Code matched; the entry has been consumed.
    Verified,
    /// A live code exists for this email but the submitted one differs.
    Mismatch,
    /// A code existed but its validity window has passed.
    Expired,
    /// No code was ever issued (or a previous one was already consumed).
    NotFound,
}

#[derive(Debug)]
struct IssuedCode {
    code: String,
    issued_at: Instant,
}

/// In-process store of pending email verification codes, keyed by the
/// candidate address. Entries live for `ttl`; a fresh code for the same
/// address is refused until `resend_cooldown` has elapsed since the last
/// send. The mutex is never held across an await point.
pub struct CodeStore {
    ttl: Duration,
    resend_cooldown: Duration,
    entries: Mutex<HashMap<String, IssuedCode>>,
}

impl CodeStore {
    pub fn new(ttl: Duration, resend_cooldown: Duration) -> Self {
        Self {
            ttl,
            resend_cooldown,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Generates a fresh 6-digit code for `email`, or reports the seconds
    /// left on the resend cooldown. The code is not recorded yet: callers
    /// dispatch the email first and call [`CodeStore::store`] once the
    /// hand-off succeeded, so a failed send never burns the cooldown.
    pub fn issue(&self, email: &str) -> Result<String, u64> {
        let entries = self.entries.lock().unwrap();
        if let Some(existing) = entries.get(email) {
            let elapsed = existing.issued_at.elapsed();
            if elapsed < self.resend_cooldown {
                let remaining = self.resend_cooldown - elapsed;
                return Err(remaining.as_secs().max(1));
            }
        }
        drop(entries);

        let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        Ok(code.to_string())
    }

    /// Records a dispatched code, replacing any previous one for the address
    /// and restarting both the validity window and the resend cooldown.
    pub fn store(&self, email: &str, code: String) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            email.to_string(),
            IssuedCode {
                code,
                issued_at: Instant::now(),
            },
        );
    }

    /// Checks `code` against the pending entry for `email`. A match consumes
    /// the entry; a stale entry is pruned; a mismatch leaves the entry in
    /// place so the user can retry with the emailed code.
    pub fn verify(&self, email: &str, code: &str) -> CodeCheck {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(email) {
            None => CodeCheck::NotFound,
            Some(entry) if entry.issued_at.elapsed() >= self.ttl => {
                entries.remove(email);
                CodeCheck::Expired
            }
            Some(entry) if entry.code == code => {
                entries.remove(email);
                CodeCheck::Verified
            }
            Some(_) => CodeCheck::Mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CodeStore {
        CodeStore::new(Duration::from_secs(600), Duration::from_secs(60))
    }

    #[tokio::test(start_paused = true)]
    async fn issued_code_verifies_once() {
        let codes = store();
        let code = codes.issue("a@b.com").unwrap();
        assert_eq!(code.len(), 6);
        codes.store("a@b.com", code.clone());

        assert_eq!(codes.verify("a@b.com", &code), CodeCheck::Verified);
        // Consumed: a second attempt with the same code finds nothing.
        assert_eq!(codes.verify("a@b.com", &code), CodeCheck::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_code_keeps_the_entry_alive() {
        let codes = store();
        let code = codes.issue("a@b.com").unwrap();
        codes.store("a@b.com", code.clone());

        let wrong = if code == "123456" { "654321" } else { "123456" };
        assert_eq!(codes.verify("a@b.com", wrong), CodeCheck::Mismatch);
        assert_eq!(codes.verify("a@b.com", &code), CodeCheck::Verified);
    }

    #[tokio::test(start_paused = true)]
    async fn verifying_without_a_code_reports_not_found() {
        let codes = store();
        assert_eq!(codes.verify("nobody@b.com", "123456"), CodeCheck::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn codes_expire_after_the_ttl() {
        let codes = store();
        let code = codes.issue("a@b.com").unwrap();
        codes.store("a@b.com", code.clone());

        tokio::time::advance(Duration::from_secs(601)).await;
        assert_eq!(codes.verify("a@b.com", &code), CodeCheck::Expired);
        // The stale entry was pruned on the way out.
        assert_eq!(codes.verify("a@b.com", &code), CodeCheck::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn resend_respects_the_cooldown() {
        let codes = store();
        let code = codes.issue("a@b.com").unwrap();
        codes.store("a@b.com", code);

        let remaining = codes.issue("a@b.com").unwrap_err();
        assert!(remaining > 0 && remaining <= 60);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(codes.issue("a@b.com").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_dispatch_does_not_start_the_cooldown() {
        let codes = store();
        // issue() alone (send failed, nothing stored): retry immediately.
        let _ = codes.issue("a@b.com").unwrap();
        assert!(codes.issue("a@b.com").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn generated_codes_are_six_digits() {
        let codes = store();
        for _ in 0..100 {
            let code = codes.issue("x@y.com").unwrap();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

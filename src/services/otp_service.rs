//! OTP challenge store - Mocked mobile verification channel.
//!
//! Issues short-lived-in-spirit (but never expiring) 6-digit challenges
//! keyed by mobile number. The two-tier verification policy mirrors the
//! mocked SMS channel: an exact match is required while a challenge is
//! pending, and a mobile that never requested one accepts any
//! well-formed 6-digit code. Codes have no expiry timer; they live
//! until consumed or overwritten.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::Rng;

use crate::config::{OTP_CODE_SPACE, OTP_LENGTH};

/// State of a challenge slot for one mobile number.
enum Challenge {
    /// A code was issued and not yet used
    Pending(String),
    /// The last code was used; a new request is required before the
    /// number verifies again (codes are single-use)
    Consumed,
}

/// Process-wide OTP challenge map, injected explicitly so tests can
/// construct isolated instances.
#[derive(Default)]
pub struct OtpStore {
    challenges: Mutex<HashMap<String, Challenge>>,
}

impl OtpStore {
    /// Create an empty challenge store
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh 6-digit code for the mobile number, overwriting
    /// any prior challenge, and return it for out-of-band delivery.
    ///
    /// Codes are uniform over "000000"-"999999"; leading zeros are valid.
    pub fn request(&self, mobile: &str) -> String {
        let code = format!(
            "{:0width$}",
            rand::thread_rng().gen_range(0..OTP_CODE_SPACE),
            width = OTP_LENGTH
        );

        self.challenges
            .lock()
            .expect("otp store lock poisoned")
            .insert(mobile.to_string(), Challenge::Pending(code.clone()));

        code
    }

    /// Verify a submitted code for the mobile number.
    ///
    /// - Pending challenge: true iff the code matches exactly; the
    ///   challenge is consumed on success and kept on mismatch.
    /// - Consumed challenge: false until a new code is requested.
    /// - Never challenged: any syntactically valid 6-digit code passes
    ///   (permissive demo fallback).
    pub fn verify(&self, mobile: &str, submitted: &str) -> bool {
        let mut challenges = self.challenges.lock().expect("otp store lock poisoned");

        let matched = matches!(
            challenges.get(mobile),
            Some(Challenge::Pending(code)) if code == submitted
        );
        if matched {
            challenges.insert(mobile.to_string(), Challenge::Consumed);
            return true;
        }

        match challenges.get(mobile) {
            // Pending mismatch or an already-consumed code
            Some(_) => false,
            None => is_well_formed_code(submitted),
        }
    }
}

/// Check that a code is exactly six ASCII digits.
fn is_well_formed_code(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

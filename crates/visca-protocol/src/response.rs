//! Classification of reply payloads.
//!
//! Every packet a camera sends back falls into one of a small, closed set of
//! shapes. Classification looks only at the payload bytes; it does not know
//! which request triggered the reply.
//!
//! | Payload      | Kind            |
//! |--------------|-----------------|
//! | `60 02`      | SyntaxError     |
//! | `61 41`      | NotExecutable   |
//! | `41`         | Acknowledge     |
//! | `51`         | Completion      |
//! | `50 ...`     | InquiryReply    |
//! | anything else| Other           |

use serde::{Deserialize, Serialize};
use std::fmt;
use visca_core::constants::{
    REPLY_ACK, REPLY_COMPLETION, REPLY_INQUIRY, REPLY_NOT_EXECUTABLE, REPLY_SYNTAX_ERROR,
};

use crate::frame::hex;

/// Classified reply payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Command accepted, execution started.
    Acknowledge,

    /// Command finished executing.
    Completion,

    /// Answer to an inquiry; holds the bytes following `0x50`.
    InquiryReply(Vec<u8>),

    /// The camera could not parse the packet.
    SyntaxError,

    /// The packet was understood but cannot run in the current state.
    NotExecutable,

    /// A payload of no known shape.
    Other(Vec<u8>),
}

impl Response {
    /// Classify a payload (header and terminator excluded).
    ///
    /// Exact matches are checked before the inquiry prefix, so the rules are
    /// applied in a fixed priority order.
    ///
    /// ```
    /// use visca_protocol::Response;
    ///
    /// assert_eq!(Response::classify(&[0x60, 0x02]), Response::SyntaxError);
    /// assert_eq!(Response::classify(&[0x61, 0x41]), Response::NotExecutable);
    /// assert_eq!(Response::classify(&[0x50, 0x02]), Response::InquiryReply(vec![0x02]));
    /// ```
    pub fn classify(payload: &[u8]) -> Self {
        match payload {
            p if p == REPLY_SYNTAX_ERROR.as_slice() => Response::SyntaxError,
            p if p == REPLY_NOT_EXECUTABLE.as_slice() => Response::NotExecutable,
            [b] if *b == REPLY_ACK => Response::Acknowledge,
            [b] if *b == REPLY_COMPLETION => Response::Completion,
            [first, rest @ ..] if *first == REPLY_INQUIRY => Response::InquiryReply(rest.to_vec()),
            other => Response::Other(other.to_vec()),
        }
    }

    /// Returns `true` for the two device-side error replies.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Response::SyntaxError | Response::NotExecutable)
    }

    /// Returns `true` if this is an inquiry reply.
    #[must_use]
    pub fn is_inquiry_reply(&self) -> bool {
        matches!(self, Response::InquiryReply(_))
    }

    /// Result bytes of an inquiry reply.
    #[must_use]
    pub fn inquiry_result(&self) -> Option<&[u8]> {
        match self {
            Response::InquiryReply(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Acknowledge => write!(f, "Acknowledge"),
            Response::Completion => write!(f, "Completion"),
            Response::InquiryReply(bytes) => write!(f, "InquiryReply[{}]", hex(bytes)),
            Response::SyntaxError => write!(f, "SyntaxError"),
            Response::NotExecutable => write!(f, "NotExecutable"),
            Response::Other(bytes) => write!(f, "Other[{}]", hex(bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[0x60, 0x02], Response::SyntaxError)]
    #[case(&[0x61, 0x41], Response::NotExecutable)]
    #[case(&[0x41], Response::Acknowledge)]
    #[case(&[0x51], Response::Completion)]
    #[case(&[0x50, 0x02], Response::InquiryReply(vec![0x02]))]
    #[case(&[0x50], Response::InquiryReply(vec![]))]
    #[case(&[0x50, 0x00, 0x00, 0x01, 0x02], Response::InquiryReply(vec![0x00, 0x00, 0x01, 0x02]))]
    fn test_classify(#[case] payload: &[u8], #[case] expected: Response) {
        assert_eq!(Response::classify(payload), expected);
    }

    #[rstest]
    #[case(&[])]
    #[case(&[0x42])]
    #[case(&[0x41, 0x00])]
    #[case(&[0x51, 0x51])]
    #[case(&[0x60, 0x03])]
    #[case(&[0x60, 0x02, 0x00])]
    #[case(&[0x61])]
    fn test_classify_other(#[case] payload: &[u8]) {
        assert_eq!(Response::classify(payload), Response::Other(payload.to_vec()));
    }

    #[test]
    fn test_helpers() {
        assert!(Response::SyntaxError.is_error());
        assert!(Response::NotExecutable.is_error());
        assert!(!Response::Completion.is_error());

        let reply = Response::classify(&[0x50, 0x03]);
        assert!(reply.is_inquiry_reply());
        assert_eq!(reply.inquiry_result(), Some(&[0x03][..]));
        assert_eq!(Response::Acknowledge.inquiry_result(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Response::classify(&[0x50, 0x0A]).to_string(), "InquiryReply[0A]");
        assert_eq!(Response::classify(&[0x7E]).to_string(), "Other[7E]");
    }
}

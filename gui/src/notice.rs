/// Conditions that have a canned display text. Service failures only fall
/// back to this table when the service didn't provide its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyPrompt,
    ServiceFailure,
    TransportFailure,
}

pub fn fallback_message(notice: Notice) -> &'static str {
    match notice {
        Notice::EmptyPrompt => "Please enter a prompt",
        Notice::ServiceFailure => "Failed to generate image",
        Notice::TransportFailure => "An error occurred while generating the image",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_texts() {
        assert_eq!(fallback_message(Notice::EmptyPrompt), "Please enter a prompt");
        assert_eq!(
            fallback_message(Notice::ServiceFailure),
            "Failed to generate image"
        );
        assert_eq!(
            fallback_message(Notice::TransportFailure),
            "An error occurred while generating the image"
        );
    }
}

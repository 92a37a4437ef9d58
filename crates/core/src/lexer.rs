use crate::error::LangError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Verb keywords
    List,
    Book,
    Confirm,
    Pay,
    Cancel,
    View,
    // Resource keywords
    Concert,
    Football,
    Train,
    Airline,
    // Structural keywords
    Tickets,
    Bookings,
    Match,
    From,
    To,
    On,
    At,
    For,
    In,
    My,
    Area,
    /// Date literal, exactly `YYYY-MM-DD` (shape only; calendar validity
    /// is the validator's job)
    Date(String),
    /// Time literal, exactly `HH:MM` (shape only)
    Time(String),
    /// Quoted string (content without quotes, original casing, no escapes)
    Str(String),
    /// Bare identifier word, lower-cased at capture
    Word(String),
    // End of input
    Eof,
}

impl Token {
    /// Short description used in parse error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Date(d) => format!("date '{}'", d),
            Token::Time(t) => format!("time '{}'", t),
            Token::Str(s) => format!("\"{}\"", s),
            Token::Word(w) => format!("'{}'", w),
            Token::Eof => "end of input".to_string(),
            other => format!("'{}'", keyword_text(other)),
        }
    }
}

fn keyword_text(token: &Token) -> &'static str {
    match token {
        Token::List => "list",
        Token::Book => "book",
        Token::Confirm => "confirm",
        Token::Pay => "pay",
        Token::Cancel => "cancel",
        Token::View => "view",
        Token::Concert => "concert",
        Token::Football => "football",
        Token::Train => "train",
        Token::Airline => "airline",
        Token::Tickets => "tickets",
        Token::Bookings => "bookings",
        Token::Match => "match",
        Token::From => "from",
        Token::To => "to",
        Token::On => "on",
        Token::At => "at",
        Token::For => "for",
        Token::In => "in",
        Token::My => "my",
        Token::Area => "area",
        _ => "?",
    }
}

/// Classifies a lower-cased word as a keyword token, if it is one.
///
/// Whole-word matching means `bookings` can never be mistaken for `book`,
/// and keywords always win over bare [`Token::Word`] identifiers. Unquoted
/// keywords therefore never appear inside person/location names.
fn keyword(word: &str) -> Option<Token> {
    let token = match word {
        "list" => Token::List,
        "book" => Token::Book,
        "confirm" => Token::Confirm,
        "pay" => Token::Pay,
        "cancel" => Token::Cancel,
        "view" => Token::View,
        "concert" => Token::Concert,
        "football" => Token::Football,
        "train" => Token::Train,
        "airline" => Token::Airline,
        "tickets" => Token::Tickets,
        "bookings" => Token::Bookings,
        "match" => Token::Match,
        "from" => Token::From,
        "to" => Token::To,
        "on" => Token::On,
        "at" => Token::At,
        "for" => Token::For,
        "in" => Token::In,
        "my" => Token::My,
        "area" => Token::Area,
        _ => return None,
    };
    Some(token)
}

/// A token tagged with its byte offset in the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// Tokenizes one input line.
///
/// Keyword matching is case-insensitive; bare words are lower-cased at
/// capture. Quoted strings keep their original casing. Digit runs are only
/// legal as complete `YYYY-MM-DD` or `HH:MM` literals. Any unrecognized
/// character is a lex error carrying the character and its position -- a lex
/// error always fails the whole parse, there is no silent recovery.
pub fn lex(input: &str) -> Result<Vec<Spanned>, LangError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        // Whitespace
        if c == ' ' || c == '\t' {
            pos += 1;
            continue;
        }

        let tok_pos = pos;

        // Quoted string
        if c == '"' {
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(LangError::lex(tok_pos, "unterminated quoted string"));
                }
                let sc = chars[pos];
                if sc == '"' {
                    pos += 1;
                    break;
                }
                s.push(sc);
                pos += 1;
            }
            if s.is_empty() {
                return Err(LangError::lex(tok_pos, "empty quoted string"));
            }
            tokens.push(Spanned {
                token: Token::Str(s),
                pos: tok_pos,
            });
            continue;
        }

        // Date or time literal
        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let run = pos - start;
            if run == 4 && pos < chars.len() && chars[pos] == '-' {
                // YYYY-MM-DD
                pos += 1;
                for _ in 0..2 {
                    if !(pos < chars.len() && chars[pos].is_ascii_digit()) {
                        return Err(LangError::lex(start, "malformed date, use YYYY-MM-DD"));
                    }
                    pos += 1;
                }
                if !(pos < chars.len() && chars[pos] == '-') {
                    return Err(LangError::lex(start, "malformed date, use YYYY-MM-DD"));
                }
                pos += 1;
                for _ in 0..2 {
                    if !(pos < chars.len() && chars[pos].is_ascii_digit()) {
                        return Err(LangError::lex(start, "malformed date, use YYYY-MM-DD"));
                    }
                    pos += 1;
                }
                let s: String = chars[start..pos].iter().collect();
                tokens.push(Spanned {
                    token: Token::Date(s),
                    pos: start,
                });
                continue;
            }
            if run == 2 && pos < chars.len() && chars[pos] == ':' {
                // HH:MM
                pos += 1;
                for _ in 0..2 {
                    if !(pos < chars.len() && chars[pos].is_ascii_digit()) {
                        return Err(LangError::lex(start, "malformed time, use HH:MM"));
                    }
                    pos += 1;
                }
                let s: String = chars[start..pos].iter().collect();
                tokens.push(Spanned {
                    token: Token::Time(s),
                    pos: start,
                });
                continue;
            }
            return Err(LangError::lex(
                start,
                format!("unexpected character '{}'", c),
            ));
        }

        // Keyword or identifier word
        if c.is_ascii_alphabetic() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_alphabetic() {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            let lower = word.to_ascii_lowercase();
            let token = keyword(&lower).unwrap_or(Token::Word(lower));
            tokens.push(Spanned { token, pos: start });
            continue;
        }

        return Err(LangError::lex(
            tok_pos,
            format!("unexpected character '{}'", c),
        ));
    }

    tokens.push(Spanned {
        token: Token::Eof,
        pos: chars.len(),
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        lex(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("BOOK Train FROM"),
            vec![Token::Book, Token::Train, Token::From, Token::Eof]
        );
    }

    #[test]
    fn words_are_lowercased() {
        assert_eq!(
            kinds("Kingston"),
            vec![Token::Word("kingston".into()), Token::Eof]
        );
    }

    #[test]
    fn bookings_is_not_book() {
        assert_eq!(kinds("bookings"), vec![Token::Bookings, Token::Eof]);
    }

    #[test]
    fn date_and_time_literals() {
        assert_eq!(
            kinds("2025-06-01 14:30"),
            vec![
                Token::Date("2025-06-01".into()),
                Token::Time("14:30".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn quoted_string_keeps_casing() {
        assert_eq!(
            kinds("\"Jane Doe\""),
            vec![Token::Str("Jane Doe".into()), Token::Eof]
        );
    }

    #[test]
    fn quoted_keyword_is_a_string_not_a_keyword() {
        assert_eq!(kinds("\"for\""), vec![Token::Str("for".into()), Token::Eof]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = lex("book \"jane").unwrap_err();
        assert_eq!(err.pos, 5);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn bare_digits_are_an_error() {
        assert!(lex("1234").is_err());
        assert!(lex("12-34").is_err());
    }

    #[test]
    fn malformed_date_is_an_error() {
        let err = lex("2025-6-1").unwrap_err();
        assert!(err.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn unknown_character_reports_position() {
        let err = lex("book #train").unwrap_err();
        assert_eq!(err.pos, 5);
        assert!(err.message.contains('#'));
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(
            kinds("  view \t bookings "),
            vec![Token::View, Token::Bookings, Token::Eof]
        );
    }
}

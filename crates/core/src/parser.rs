//! Recursive-descent grammar for the booking command language.
//!
//! Productions (the externally visible wire contract):
//!
//! ```text
//! statement      := list_cmd | booking_cmd | status_cmd | view_cmd
//! list_cmd       := LIST event_type TICKETS IN MY AREA
//! booking_cmd    := book_transport | book_event
//! book_transport := BOOK (TRAIN|AIRLINE) FROM location TO location
//!                   ON DATE AT TIME FOR person
//! book_event     := BOOK event_name CONCERT FOR person
//!                 | BOOK event_name FOOTBALL MATCH FOR person
//! status_cmd     := (CONFIRM|PAY|CANCEL) event_type FOR person
//! view_cmd       := VIEW BOOKINGS
//! event_type     := CONCERT | FOOTBALL | TRAIN | AIRLINE
//! location       := (WORD|STRING)+
//! person         := (WORD|STRING)+
//! event_name     := (WORD|STRING)+
//! ```
//!
//! Repeated fields accumulate word/string tokens until the next required
//! keyword; one token of lookahead suffices, no backtracking. Any production
//! mismatch or trailing token fails the parse closed -- no partial command is
//! ever returned.

use crate::command::{Command, Resource, StatusAction};
use crate::error::LangError;
use crate::lexer::{Spanned, Token};

/// Parses a token sequence into a single [`Command`].
pub fn parse(tokens: &[Spanned]) -> Result<Command, LangError> {
    let mut parser = Parser::new(tokens);
    let cmd = parser.parse_statement()?;
    parser.expect_eof()?;
    Ok(cmd)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Spanned {
        // The lexer always terminates the sequence with Eof.
        &self.tokens[self.pos.min(self.tokens.len().saturating_sub(1))]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len().saturating_sub(1))];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn err(&self, msg: impl Into<String>) -> LangError {
        LangError::parse(self.cur().pos, msg)
    }

    fn expect(&mut self, expected: Token) -> Result<(), LangError> {
        if self.peek() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!(
                "expected {}, got {}",
                expected.describe(),
                self.peek().describe()
            )))
        }
    }

    fn expect_eof(&mut self) -> Result<(), LangError> {
        if self.peek() == &Token::Eof {
            Ok(())
        } else {
            Err(self.err(format!("unexpected {}", self.peek().describe())))
        }
    }

    // -- Productions --------------------------------------------------------

    fn parse_statement(&mut self) -> Result<Command, LangError> {
        match self.peek().clone() {
            Token::List => self.parse_list(),
            Token::Book => self.parse_booking(),
            Token::Confirm => self.parse_status(StatusAction::Confirm),
            Token::Pay => self.parse_status(StatusAction::Pay),
            Token::Cancel => self.parse_status(StatusAction::Cancel),
            Token::View => self.parse_view(),
            other => Err(self.err(format!(
                "expected a command verb (list, book, confirm, pay, cancel, view), got {}",
                other.describe()
            ))),
        }
    }

    fn parse_list(&mut self) -> Result<Command, LangError> {
        self.expect(Token::List)?;
        let resource = self.parse_event_type()?;
        self.expect(Token::Tickets)?;
        self.expect(Token::In)?;
        self.expect(Token::My)?;
        self.expect(Token::Area)?;
        Ok(Command::ListEvents { resource })
    }

    fn parse_booking(&mut self) -> Result<Command, LangError> {
        self.expect(Token::Book)?;
        match self.peek() {
            Token::Train => {
                self.advance();
                self.parse_transport(Resource::Train)
            }
            Token::Airline => {
                self.advance();
                self.parse_transport(Resource::Airline)
            }
            _ => self.parse_event_booking(),
        }
    }

    fn parse_transport(&mut self, resource: Resource) -> Result<Command, LangError> {
        self.expect(Token::From)?;
        let origin = self.parse_phrase("origin location")?;
        self.expect(Token::To)?;
        let destination = self.parse_phrase("destination location")?;
        self.expect(Token::On)?;
        let date = self.take_date()?;
        self.expect(Token::At)?;
        let time = self.take_time()?;
        self.expect(Token::For)?;
        let person = self.parse_phrase("person name")?;
        Ok(Command::BookTransport {
            resource,
            origin,
            destination,
            date,
            time,
            person,
        })
    }

    fn parse_event_booking(&mut self) -> Result<Command, LangError> {
        let event_name = self.parse_phrase("event name")?;
        let resource = match self.peek() {
            Token::Concert => {
                self.advance();
                Resource::Concert
            }
            Token::Football => {
                self.advance();
                self.expect(Token::Match)?;
                Resource::Football
            }
            other => {
                return Err(self.err(format!(
                    "expected 'concert' or 'football', got {}",
                    other.describe()
                )))
            }
        };
        self.expect(Token::For)?;
        let person = self.parse_phrase("person name")?;
        Ok(Command::BookEvent {
            resource,
            event_name,
            person,
        })
    }

    fn parse_status(&mut self, action: StatusAction) -> Result<Command, LangError> {
        self.advance(); // the verb itself
        let resource = self.parse_event_type()?;
        self.expect(Token::For)?;
        let person = self.parse_phrase("person name")?;
        Ok(Command::StatusChange {
            action,
            resource,
            person,
        })
    }

    fn parse_view(&mut self) -> Result<Command, LangError> {
        self.expect(Token::View)?;
        self.expect(Token::Bookings)?;
        Ok(Command::ViewBookings)
    }

    fn parse_event_type(&mut self) -> Result<Resource, LangError> {
        let resource = match self.peek() {
            Token::Concert => Resource::Concert,
            Token::Football => Resource::Football,
            Token::Train => Resource::Train,
            Token::Airline => Resource::Airline,
            other => {
                return Err(self.err(format!(
                    "expected an event type (concert, football, train, airline), got {}",
                    other.describe()
                )))
            }
        };
        self.advance();
        Ok(resource)
    }

    /// One or more word/string tokens, space-joined, stopping at the next
    /// keyword. Quoted strings contribute their content verbatim.
    fn parse_phrase(&mut self, what: &str) -> Result<String, LangError> {
        let mut parts: Vec<String> = Vec::new();
        loop {
            match self.peek() {
                Token::Word(w) => {
                    parts.push(w.clone());
                    self.advance();
                }
                Token::Str(s) => {
                    parts.push(s.clone());
                    self.advance();
                }
                _ => break,
            }
        }
        if parts.is_empty() {
            return Err(self.err(format!(
                "expected {}, got {}",
                what,
                self.peek().describe()
            )));
        }
        Ok(parts.join(" "))
    }

    fn take_date(&mut self) -> Result<String, LangError> {
        if let Token::Date(d) = self.peek().clone() {
            self.advance();
            Ok(d)
        } else {
            Err(self.err(format!(
                "expected a date (YYYY-MM-DD), got {}",
                self.peek().describe()
            )))
        }
    }

    fn take_time(&mut self) -> Result<String, LangError> {
        if let Token::Time(t) = self.peek().clone() {
            self.advance();
            Ok(t)
        } else {
            Err(self.err(format!(
                "expected a time (HH:MM), got {}",
                self.peek().describe()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::command::{Command, Resource, StatusAction};
    use crate::parse_line;

    #[test]
    fn list_command() {
        let cmd = parse_line("list concert tickets in my area").unwrap();
        assert_eq!(
            cmd,
            Command::ListEvents {
                resource: Resource::Concert
            }
        );
    }

    #[test]
    fn book_transport_multi_word_locations() {
        let cmd =
            parse_line("book train from kingston to montego bay on 2025-06-01 at 14:30 for john smith")
                .unwrap();
        assert_eq!(
            cmd,
            Command::BookTransport {
                resource: Resource::Train,
                origin: "kingston".into(),
                destination: "montego bay".into(),
                date: "2025-06-01".into(),
                time: "14:30".into(),
                person: "john smith".into(),
            }
        );
    }

    #[test]
    fn book_concert() {
        let cmd = parse_line("book reggae sumfest concert for jane").unwrap();
        assert_eq!(
            cmd,
            Command::BookEvent {
                resource: Resource::Concert,
                event_name: "reggae sumfest".into(),
                person: "jane".into(),
            }
        );
    }

    #[test]
    fn book_football_match() {
        let cmd = parse_line("book world cup football match for john smith").unwrap();
        assert_eq!(
            cmd,
            Command::BookEvent {
                resource: Resource::Football,
                event_name: "world cup".into(),
                person: "john smith".into(),
            }
        );
    }

    #[test]
    fn quoted_names_survive_verbatim() {
        let cmd = parse_line("book \"Jane Doe\" concert for \"Jane Doe\"").unwrap();
        assert_eq!(
            cmd,
            Command::BookEvent {
                resource: Resource::Concert,
                event_name: "Jane Doe".into(),
                person: "Jane Doe".into(),
            }
        );
    }

    #[test]
    fn status_commands() {
        let cmd = parse_line("confirm train for john").unwrap();
        assert_eq!(
            cmd,
            Command::StatusChange {
                action: StatusAction::Confirm,
                resource: Resource::Train,
                person: "john".into(),
            }
        );
        assert!(matches!(
            parse_line("pay concert for jane").unwrap(),
            Command::StatusChange {
                action: StatusAction::Pay,
                ..
            }
        ));
        assert!(matches!(
            parse_line("cancel airline for jane").unwrap(),
            Command::StatusChange {
                action: StatusAction::Cancel,
                ..
            }
        ));
    }

    #[test]
    fn view_bookings() {
        assert_eq!(parse_line("view bookings").unwrap(), Command::ViewBookings);
    }

    #[test]
    fn trailing_tokens_fail_closed() {
        assert!(parse_line("view bookings now").is_err());
        assert!(parse_line("list concert tickets in my area please").is_err());
    }

    #[test]
    fn unquoted_keyword_truncates_a_person_field() {
        // "for" is structural; a bare "for" inside a name ends the phrase
        // and leaves a trailing token. Quoting is the escape hatch.
        assert!(parse_line("confirm train for waiting for godot").is_err());
        let cmd = parse_line("confirm train for \"waiting for godot\"").unwrap();
        assert_eq!(
            cmd,
            Command::StatusChange {
                action: StatusAction::Confirm,
                resource: Resource::Train,
                person: "waiting for godot".into(),
            }
        );
    }

    #[test]
    fn partial_matches_are_syntax_errors() {
        assert!(parse_line("book train from kingston").is_err());
        assert!(parse_line("list concert tickets").is_err());
        assert!(parse_line("book concert for jane").is_err()); // missing event name
        assert!(parse_line("view").is_err());
        assert!(parse_line("").is_err());
    }

    #[test]
    fn date_and_time_positions_are_fixed() {
        // time where the date belongs
        assert!(parse_line("book train from a to b on 14:30 at 14:30 for x").is_err());
        // date where the time belongs
        assert!(parse_line("book train from a to b on 2025-06-01 at 2025-06-01 for x").is_err());
    }

    #[test]
    fn error_reports_offending_position() {
        let err = parse_line("book train from kingston to").unwrap_err();
        assert_eq!(err.pos, 27);
        assert!(err.message.contains("destination"));
    }
}

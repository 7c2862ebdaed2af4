//! Top-level variable assignments of a PKGBUILD, without running a shell.
//!
//! Only what a version declaration needs is understood: `name=value`
//! statements outside function bodies, single and double quotes, backslash
//! escapes, and `$name` / `${name}` expansion of earlier assignments.
//! Arrays, functions, here-document bodies and commands are skipped. A value
//! that needs anything more (command substitution, parameter operators) is
//! kept as unresolvable rather than guessed, and so is an assignment that
//! only runs on some path: inside `if`/`case`/loops, or after `&&`, `||`
//! or a pipe.

use std::collections::HashMap;

/// Value of one assignment: the expanded text, or why it could not be expanded
pub type Assigned = Result<String, String>;

/// Parse every top-level scalar assignment, later assignments winning.
pub fn parse_assignments(content: &str) -> HashMap<String, Assigned> {
    let mut scanner = Scanner::new(content);
    scanner.run();
    scanner.vars
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    brace_depth: usize,
    paren_depth: usize,
    statement_start: bool,
    /// Open `if`/`case`/`for`/`while`/`until` commands
    compound_depth: usize,
    /// Open `case` commands, where `)` ends a pattern
    case_depth: usize,
    /// The current command runs only on some path (`&&`, `||`, `|`, `&`)
    conditional: bool,
    /// Here-document terminators waiting for the end of the line
    heredocs: Vec<Heredoc>,
    vars: HashMap<String, Assigned>,
}

struct Heredoc {
    delimiter: String,
    strip_tabs: bool,
}

const CONDITIONAL_ASSIGNMENT: &str = "conditional assignment";

impl Scanner {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            pos: 0,
            brace_depth: 0,
            paren_depth: 0,
            statement_start: true,
            compound_depth: 0,
            case_depth: 0,
            conditional: false,
            heredocs: Vec::new(),
            vars: HashMap::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn run(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.pos += 1;
                continue;
            }

            let at_start = std::mem::replace(&mut self.statement_start, false);
            if at_start {
                if self.keyword() {
                    continue;
                }
                if self.brace_depth == 0 && self.paren_depth == 0 {
                    if let Some(name) = self.assignment_name() {
                        if self.compound_depth > 0 || self.conditional {
                            self.conditional_assignment(name);
                        } else {
                            self.assignment(name);
                        }
                        continue;
                    }
                }
            }

            self.skip_token();
        }
    }

    /// Consume a reserved word that opens, continues or closes a compound command
    fn keyword(&mut self) -> bool {
        let start = self.pos;
        let mut end = start;
        while let Some(c) = self.chars.get(end) {
            if c.is_ascii_lowercase() {
                end += 1;
            } else {
                break;
            }
        }
        match self.chars.get(end) {
            None | Some(' ' | '\t' | '\n' | ';') => {}
            Some(_) => return false,
        }
        let word: String = self.chars[start..end].iter().collect();
        match word.as_str() {
            "if" | "while" | "until" => {
                self.compound_depth += 1;
                self.statement_start = true;
            }
            "for" => self.compound_depth += 1,
            "case" => {
                self.compound_depth += 1;
                self.case_depth += 1;
            }
            "then" | "elif" | "else" | "do" => self.statement_start = true,
            "fi" | "done" => self.compound_depth = self.compound_depth.saturating_sub(1),
            "esac" => {
                self.compound_depth = self.compound_depth.saturating_sub(1);
                self.case_depth = self.case_depth.saturating_sub(1);
            }
            _ => return false,
        }
        self.pos = end;
        true
    }

    /// Consume `name=` if the statement is an assignment
    fn assignment_name(&mut self) -> Option<String> {
        let start = self.pos;
        let first = self.peek()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let mut end = start;
        while let Some(c) = self.chars.get(end) {
            if c.is_ascii_alphanumeric() || *c == '_' {
                end += 1;
            } else {
                break;
            }
        }
        if self.chars.get(end) != Some(&'=') {
            return None;
        }
        let name: String = self.chars[start..end].iter().collect();
        self.pos = end + 1;
        Some(name)
    }

    fn assignment(&mut self, name: String) {
        if self.peek() == Some('(') {
            // Arrays never hold a version; skip to the matching paren
            self.paren_depth += 1;
            self.pos += 1;
            return;
        }
        let value = self.value();
        self.vars.insert(name, value);
    }

    /// Record `name` as set on some paths only, skipping its value
    fn conditional_assignment(&mut self, name: String) {
        if self.peek() == Some('(') {
            self.paren_depth += 1;
            self.pos += 1;
            return;
        }
        let _ = self.value();
        self.vars
            .insert(name, Err(CONDITIONAL_ASSIGNMENT.to_string()));
    }

    /// Read one shell word, expanding variables assigned so far
    fn value(&mut self) -> Assigned {
        let mut out = String::new();
        let mut failure: Option<String> = None;

        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\n' | ';' | '&' | '|' => break,
                '\'' => {
                    self.pos += 1;
                    while let Some(c) = self.peek() {
                        self.pos += 1;
                        if c == '\'' {
                            break;
                        }
                        out.push(c);
                    }
                }
                '"' => {
                    self.pos += 1;
                    while let Some(c) = self.peek() {
                        match c {
                            '"' => {
                                self.pos += 1;
                                break;
                            }
                            '\\' => {
                                match self.peek_at(1) {
                                    Some(n @ ('$' | '"' | '\\' | '`')) => out.push(n),
                                    Some('\n') => {}
                                    Some(n) => {
                                        out.push('\\');
                                        out.push(n);
                                    }
                                    None => out.push('\\'),
                                }
                                self.pos += 2;
                            }
                            '$' => self.expand(&mut out, &mut failure),
                            '`' => {
                                failure.get_or_insert_with(|| "command substitution".to_string());
                                self.pos += 1;
                            }
                            _ => {
                                out.push(c);
                                self.pos += 1;
                            }
                        }
                    }
                }
                '\\' => {
                    match self.peek_at(1) {
                        Some('\n') | None => {}
                        Some(n) => out.push(n),
                    }
                    self.pos += 2;
                }
                '$' => self.expand(&mut out, &mut failure),
                '`' | '(' | ')' | '<' | '>' => {
                    failure.get_or_insert_with(|| format!("unsupported syntax '{}'", c));
                    self.skip_token();
                }
                _ => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }

        match failure {
            Some(reason) => Err(reason),
            None => Ok(out),
        }
    }

    /// Expand the `$...` at the cursor into `out`
    fn expand(&mut self, out: &mut String, failure: &mut Option<String>) {
        match self.peek_at(1) {
            Some('{') => {
                let start = self.pos + 2;
                let mut end = start;
                while let Some(c) = self.chars.get(end) {
                    if *c == '}' {
                        break;
                    }
                    end += 1;
                }
                let inner: String = self.chars[start..end.min(self.chars.len())].iter().collect();
                self.pos = (end + 1).min(self.chars.len());
                if is_identifier(&inner) {
                    self.lookup(&inner, out, failure);
                } else {
                    failure.get_or_insert_with(|| format!("unsupported expansion '${{{}}}'", inner));
                }
            }
            Some('(') => {
                failure.get_or_insert_with(|| "command substitution".to_string());
                self.pos += 1;
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let start = self.pos + 1;
                let mut end = start;
                while let Some(c) = self.chars.get(end) {
                    if c.is_ascii_alphanumeric() || *c == '_' {
                        end += 1;
                    } else {
                        break;
                    }
                }
                let name: String = self.chars[start..end].iter().collect();
                self.pos = end;
                self.lookup(&name, out, failure);
            }
            _ => {
                out.push('$');
                self.pos += 1;
            }
        }
    }

    fn lookup(&self, name: &str, out: &mut String, failure: &mut Option<String>) {
        match self.vars.get(name) {
            Some(Ok(value)) => out.push_str(value),
            Some(Err(reason)) => {
                failure.get_or_insert_with(|| format!("depends on ${} ({})", name, reason));
            }
            // Unset variables expand to nothing, as in the shell
            None => {}
        }
    }

    /// Advance past one character or quoted run, tracking nesting
    fn skip_token(&mut self) {
        let Some(c) = self.peek() else { return };
        self.pos += 1;
        match c {
            '\'' => {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == '\'' {
                        break;
                    }
                }
            }
            '"' => {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    match c {
                        '\\' => self.pos += 1,
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '\\' => self.pos += 1,
            '#' if self.at_word_start() => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.pos += 1;
                }
            }
            '{' => self.brace_depth += 1,
            '}' => self.brace_depth = self.brace_depth.saturating_sub(1),
            '(' => self.paren_depth += 1,
            ')' if self.case_depth > 0 && self.paren_depth == 0 => self.statement_start = true,
            ')' => self.paren_depth = self.paren_depth.saturating_sub(1),
            '&' | '|' => {
                if self.peek() == Some(c) {
                    self.pos += 1;
                }
                self.statement_start = true;
                self.conditional = true;
            }
            '<' if self.peek() == Some('<') => self.heredoc_operator(),
            ';' => {
                self.statement_start = true;
                self.conditional = false;
            }
            '\n' => {
                self.statement_start = true;
                self.conditional = false;
                self.skip_heredoc_bodies();
            }
            _ => {}
        }
        self.pos = self.pos.min(self.chars.len());
    }

    /// After `<` of `<<WORD` / `<<-WORD`: remember the terminator
    fn heredoc_operator(&mut self) {
        self.pos += 1;
        if self.peek() == Some('<') {
            // Here-string, no body
            self.pos += 1;
            return;
        }
        let strip_tabs = self.peek() == Some('-');
        if strip_tabs {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }

        let mut delimiter = String::new();
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\n' | ';' | '&' | '|' | '<' | '>' | '(' | ')' => break,
                '\'' | '"' | '\\' => {}
                _ => delimiter.push(c),
            }
            self.pos += 1;
        }
        if !delimiter.is_empty() {
            self.heredocs.push(Heredoc {
                delimiter,
                strip_tabs,
            });
        }
    }

    /// Skip the bodies of here-documents opened on the line just ended
    fn skip_heredoc_bodies(&mut self) {
        for heredoc in std::mem::take(&mut self.heredocs) {
            while self.pos < self.chars.len() {
                let start = self.pos;
                let mut end = start;
                while end < self.chars.len() && self.chars[end] != '\n' {
                    end += 1;
                }
                let line: String = self.chars[start..end].iter().collect();
                self.pos = (end + 1).min(self.chars.len());

                let line = if heredoc.strip_tabs {
                    line.trim_start_matches('\t')
                } else {
                    line.as_str()
                };
                if line == heredoc.delimiter {
                    break;
                }
            }
        }
    }

    /// Whether the character just consumed began a word
    fn at_word_start(&self) -> bool {
        match self.pos.checked_sub(2).and_then(|i| self.chars.get(i)) {
            None => true,
            Some(prev) => prev.is_whitespace() || *prev == ';',
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

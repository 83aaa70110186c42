//! Recursive-descent parser from tokens to [`Document`].
//!
//! ```text
//! document   := (enum_decl | group)* EOF
//! group      := IDENT '{' (enum_decl | node)* '}'
//! enum_decl  := 'enum' IDENT '{' IDENT (',' IDENT)* ','? '}'
//! node       := IDENT '{' (field | node)* '}'
//! field      := marker* IDENT '=' literal ';'
//! marker     := '@' IDENT ('(' literal_list? ')')?
//! literal    := NUMBER | STRING | 'true' | 'false'
//!             | '(' literal_list? ')' | '[' literal_list? ']'
//!             | IDENT '(' literal_list? ')' | IDENT '::' IDENT | IDENT
//! ```

use bxc_core::{SchemaError, SourceLocation};

use crate::ast::{Document, EnumDecl, FieldItem, GroupBlock, Literal, Marker, NodeBlock};
use crate::lexer::{tokenize, Token, TokenKind};

/// Parse snippet text into a syntax tree.
pub fn parse_document(source: &str) -> Result<Document, SchemaError> {
    let tokens = tokenize(source)?;
    Parser { tokens, pos: 0 }.document()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The token vector always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> SchemaError {
        let token = self.peek();
        SchemaError::parse(
            token.location,
            format!("expected {expected}, found {}", token.kind.describe()),
        )
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<SourceLocation, SchemaError> {
        if self.peek().kind == kind {
            Ok(self.advance().location)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn ident(&mut self, expected: &str) -> Result<(String, SourceLocation), SchemaError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let location = self.advance().location;
                Ok((name, location))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn at_enum_decl(&self) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(kw) if kw == "enum")
            && matches!(self.peek_kind_at(1), TokenKind::Ident(_))
    }

    fn document(mut self) -> Result<Document, SchemaError> {
        let mut doc = Document {
            groups: Vec::new(),
            enums: Vec::new(),
        };
        loop {
            if self.peek().kind == TokenKind::Eof {
                return Ok(doc);
            }
            if self.at_enum_decl() {
                doc.enums.push(self.enum_decl()?);
                continue;
            }
            doc.groups.push(self.group()?);
        }
    }

    fn group(&mut self) -> Result<GroupBlock, SchemaError> {
        let (name, location) = self.ident("a declaration group such as `Attributes`")?;
        self.expect(TokenKind::LBrace, "`{` after group name")?;
        let mut group = GroupBlock {
            name,
            location,
            enums: Vec::new(),
            nodes: Vec::new(),
        };
        loop {
            match &self.peek().kind {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(group);
                }
                TokenKind::Ident(_) if self.at_enum_decl() => group.enums.push(self.enum_decl()?),
                TokenKind::Ident(_) if *self.peek_kind_at(1) == TokenKind::LBrace => {
                    group.nodes.push(self.node()?);
                }
                TokenKind::Ident(_) | TokenKind::At => {
                    return Err(SchemaError::parse(
                        self.peek().location,
                        format!(
                            "fields must be declared inside a node type, not directly in group `{}`",
                            group.name
                        ),
                    ));
                }
                _ => return Err(self.unexpected("a node type or `}`")),
            }
        }
    }

    fn enum_decl(&mut self) -> Result<EnumDecl, SchemaError> {
        self.advance();
        let (name, location) = self.ident("enum name")?;
        self.expect(TokenKind::LBrace, "`{` after enum name")?;
        let mut variants = Vec::new();
        loop {
            if self.peek().kind == TokenKind::RBrace {
                break;
            }
            variants.push(self.ident("enum variant name")?);
            if self.peek().kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`,` or `}` in enum body")?;
        Ok(EnumDecl {
            name,
            location,
            variants,
        })
    }

    fn node(&mut self) -> Result<NodeBlock, SchemaError> {
        let (name, location) = self.ident("node type name")?;
        self.expect(TokenKind::LBrace, "`{` after node type name")?;
        let mut node = NodeBlock {
            name,
            location,
            fields: Vec::new(),
            children: Vec::new(),
        };
        loop {
            match &self.peek().kind {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(node);
                }
                TokenKind::Ident(_) if self.at_enum_decl() => {
                    return Err(SchemaError::parse(
                        self.peek().location,
                        "enum declarations are only allowed at file or group level",
                    ));
                }
                TokenKind::Ident(_) if *self.peek_kind_at(1) == TokenKind::LBrace => {
                    node.children.push(self.node()?);
                }
                TokenKind::Ident(_) | TokenKind::At => node.fields.push(self.field()?),
                _ => return Err(self.unexpected("a field, a nested node type, or `}`")),
            }
        }
    }

    fn field(&mut self) -> Result<FieldItem, SchemaError> {
        let mut markers = Vec::new();
        while self.peek().kind == TokenKind::At {
            markers.push(self.marker()?);
        }
        if matches!(self.peek_kind_at(1), TokenKind::LBrace) && !markers.is_empty() {
            return Err(SchemaError::parse(
                markers[0].location,
                "markers must precede a field, not a node type",
            ));
        }
        let (name, location) = self.ident("field name")?;
        self.expect(TokenKind::Equals, "`=` after field name")?;
        let value_location = self.peek().location;
        let value = self.literal()?;
        self.expect(TokenKind::Semicolon, "`;` after field value")?;
        Ok(FieldItem {
            name,
            location,
            markers,
            value,
            value_location,
        })
    }

    fn marker(&mut self) -> Result<Marker, SchemaError> {
        let location = self.advance().location;
        let (name, _) = self.ident("marker name after `@`")?;
        let args = if self.peek().kind == TokenKind::LParen {
            self.advance();
            self.literal_list(TokenKind::RParen, "`)`")?
        } else {
            Vec::new()
        };
        Ok(Marker {
            name,
            location,
            args,
        })
    }

    fn literal_list(&mut self, close: TokenKind, close_desc: &str) -> Result<Vec<Literal>, SchemaError> {
        let mut items = Vec::new();
        loop {
            if self.peek().kind == close {
                self.advance();
                return Ok(items);
            }
            items.push(self.literal()?);
            match &self.peek().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                k if *k == close => {}
                _ => return Err(self.unexpected(&format!("`,` or {close_desc}"))),
            }
        }
    }

    fn literal(&mut self) -> Result<Literal, SchemaError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Int(v) => {
                self.advance();
                Ok(Literal::Int(v))
            }
            TokenKind::Float(v) => {
                self.advance();
                Ok(Literal::Float(v))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Literal::Str(s))
            }
            TokenKind::LParen => {
                self.advance();
                Ok(Literal::Tuple(self.literal_list(TokenKind::RParen, "`)`")?))
            }
            TokenKind::LBracket => {
                self.advance();
                Ok(Literal::List(self.literal_list(TokenKind::RBracket, "`]`")?))
            }
            TokenKind::Ident(name) => {
                self.advance();
                match (name.as_str(), &self.peek().kind) {
                    ("true", _) => Ok(Literal::Bool(true)),
                    ("false", _) => Ok(Literal::Bool(false)),
                    (_, TokenKind::LParen) => {
                        self.advance();
                        let args = self.literal_list(TokenKind::RParen, "`)`")?;
                        Ok(Literal::Call { name, args })
                    }
                    (_, TokenKind::PathSep) => {
                        self.advance();
                        let (variant, _) = self.ident("enum variant after `::`")?;
                        Ok(Literal::Path { ty: name, variant })
                    }
                    _ => Ok(Literal::Ident(name)),
                }
            }
            _ => Err(self.unexpected("a value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_nodes_and_fields() {
        let doc = parse_document(
            r#"
            Attributes {
                LocatorNode {
                    pos = (0.0, 0.0, 0.0);
                    MeshNode {
                        mesh = ":box";
                    }
                }
            }
            "#,
        )
        .unwrap();
        assert_eq!(doc.groups.len(), 1);
        let group = &doc.groups[0];
        assert_eq!(group.name, "Attributes");
        let locator = &group.nodes[0];
        assert_eq!(locator.name, "LocatorNode");
        assert_eq!(locator.fields[0].name, "pos");
        assert_eq!(
            locator.fields[0].value,
            Literal::Tuple(vec![Literal::Float(0.0); 3])
        );
        assert_eq!(locator.children[0].name, "MeshNode");
        assert_eq!(
            locator.children[0].fields[0].value,
            Literal::Str(":box".into())
        );
    }

    #[test]
    fn markers_attach_to_following_field() {
        let doc = parse_document(
            r#"Attributes { L { @display("Power") @min(0) @shader_constant(false) power = 1.5; } }"#,
        )
        .unwrap();
        let field = &doc.groups[0].nodes[0].fields[0];
        let names: Vec<_> = field.markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["display", "min", "shader_constant"]);
        assert_eq!(field.markers[1].args, vec![Literal::Int(0)]);
        assert_eq!(field.markers[2].args, vec![Literal::Bool(false)]);
    }

    #[test]
    fn enums_at_file_and_group_level() {
        let doc = parse_document(
            "enum Quality { Low, Medium, High, }\nAttributes { enum Mode { A, B } N { q = Quality::High; } }",
        )
        .unwrap();
        assert_eq!(doc.enums[0].name, "Quality");
        assert_eq!(doc.enums[0].variants.len(), 3);
        assert_eq!(doc.groups[0].enums[0].name, "Mode");
        assert_eq!(
            doc.groups[0].nodes[0].fields[0].value,
            Literal::Path {
                ty: "Quality".into(),
                variant: "High".into()
            }
        );
    }

    #[test]
    fn literal_shapes() {
        let doc = parse_document(
            "G { N { a = rgb(1, 0.5, 0); b = [1, 2]; c = null; d = (); e = true; } }",
        )
        .unwrap();
        let fields = &doc.groups[0].nodes[0].fields;
        assert!(matches!(&fields[0].value, Literal::Call { name, args } if name == "rgb" && args.len() == 3));
        assert!(matches!(&fields[1].value, Literal::List(items) if items.len() == 2));
        assert_eq!(fields[2].value, Literal::Ident("null".into()));
        assert_eq!(fields[3].value, Literal::Tuple(vec![]));
        assert_eq!(fields[4].value, Literal::Bool(true));
    }

    #[test]
    fn missing_semicolon_reports_location() {
        let err = parse_document("Attributes {\n  N {\n    a = 1\n  }\n}").unwrap_err();
        match err {
            SchemaError::Parse { location, message } => {
                assert_eq!(location, SourceLocation::new(4, 3));
                assert!(message.contains("`;`"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn fields_directly_in_group_are_rejected() {
        let err = parse_document("Attributes { a = 1; }").unwrap_err();
        assert!(err.to_string().contains("inside a node type"));
    }

    #[test]
    fn markers_before_node_are_rejected() {
        let err = parse_document("Attributes { N { @help(\"x\") M { } } }").unwrap_err();
        assert!(err.to_string().contains("markers must precede a field"));
    }

    #[test]
    fn enum_inside_node_is_rejected() {
        let err = parse_document("Attributes { N { enum E { A } } }").unwrap_err();
        assert!(err.to_string().contains("file or group level"));
    }

    #[test]
    fn unclosed_group_is_rejected() {
        let err = parse_document("Attributes { N { a = 1; }").unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }
}

//! # Parsing and Writing DIMACS Files
//!
//! Internal module containing functions for parsing DIMACS CNF files.
//! The approach is to accept input instances, even if they are not technically
//! in spec, as long as the input is still reasonable.
//!
//! ## References
//!
//! - [DIMACS CNF](http://www.satcompetition.org/2011/format-benchmarks2011.html)

use crate::{
    instances::{Cnf, ManageVars, SatInstance},
    types::{Clause, Lit, Var},
};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{i32 as nom_i32, line_ending, multispace0, multispace1, u64 as nom_u64},
    combinator::{all_consuming, map_res, recognize, success},
    error::{Error as NomError, ErrorKind, ParseError},
    multi::separated_list0,
    sequence::{pair, terminated, tuple},
    IResult,
};
use std::io::{self, BufRead, BufReader, Read, Write};
use thiserror::Error;

/// Errors occurring within the DIMACS parsing module
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid literal in the file
    #[error("invalid literal: {0}")]
    Lit(String),
    /// Invalid ending of a clause
    #[error("invalid clause ending: {0}")]
    ClauseEnding(String),
    /// The preamble never ended
    #[error("preamble never ends")]
    PreambleNoEnd,
    /// P line value is too large to fit in a [`usize`]
    #[error("value in p-line too large to fit usize: {0}")]
    PValTooLarge(u64),
    /// Invalid p line
    #[error("invalid p-line: {0}")]
    PLine(String),
    /// IO error reading file
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    /// Base error from nom parsing
    #[error("nom error: {0} ({1:?})")]
    NomError(String, ErrorKind),
    /// Incomplete nom error
    #[error("nom parser requested more data")]
    NomIncomplete,
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Lit(l0), Self::Lit(r0)) => l0 == r0,
            (Self::ClauseEnding(l0), Self::ClauseEnding(r0)) => l0 == r0,
            (Self::PValTooLarge(l0), Self::PValTooLarge(r0)) => l0 == r0,
            (Self::PLine(l0), Self::PLine(r0)) => l0 == r0,
            (Self::IOError(_), Self::IOError(_)) => true,
            (Self::NomError(l0, l1), Self::NomError(r0, r1)) => l0 == r0 && l1 == r1,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl ParseError<&str> for Error {
    fn from_error_kind(input: &str, kind: ErrorKind) -> Self {
        Self::NomError(String::from(input), kind)
    }

    fn append(_: &str, _: ErrorKind, other: Self) -> Self {
        // Other error always has precedence. This should prefer more meaningful
        // errors than [`Error::NomError`]
        other
    }
}

/// Internal type of the preamble
#[derive(PartialEq, Debug)]
struct Preamble {
    n_vars: usize,
    n_clauses: usize,
}

/// Parses a CNF instance from a reader (typically a file)
pub fn parse_cnf<R, VM>(reader: R) -> Result<SatInstance<VM>, Error>
where
    R: Read,
    VM: ManageVars + Default,
{
    let reader = BufReader::new(reader);
    let (reader, _) = parse_preamble(reader)?;
    parse_cnf_body(reader)
}

fn unwrap_dimacs_error(err: nom::Err<Error>) -> Error {
    match err {
        nom::Err::Incomplete(_) => Error::NomIncomplete,
        nom::Err::Error(e) => e,
        nom::Err::Failure(e) => e,
    }
}

/// Parses the preamble of the file, i.e., until the p-line
fn parse_preamble<R: BufRead>(mut reader: R) -> Result<(R, Preamble), Error> {
    loop {
        let mut buf = String::new();
        match reader.read_line(&mut buf) {
            Ok(len) => {
                if len == 0 {
                    return Err(Error::PreambleNoEnd);
                }
            }
            Err(ioe) => return Err(Error::IOError(ioe)),
        };
        if buf.starts_with('c') || buf.trim().is_empty() {
            continue;
        }
        if buf.starts_with('p') {
            let (_, preamble) = parse_p_line(&buf).map_err(unwrap_dimacs_error)?;
            return Ok((reader, preamble));
        }
        return Err(Error::PLine(buf));
    }
}

/// Main parser for the body of a CNF file
fn parse_cnf_body<R, VM>(mut reader: R) -> Result<SatInstance<VM>, Error>
where
    R: BufRead,
    VM: ManageVars + Default,
{
    let mut inst = SatInstance::<VM>::new();
    loop {
        let mut buf = String::new();
        match reader.read_line(&mut buf) {
            Ok(len) => {
                if len == 0 {
                    return Ok(inst);
                }
            }
            Err(ioe) => return Err(Error::IOError(ioe)),
        };
        let (_, opt_clause) = parse_cnf_line(&buf).map_err(unwrap_dimacs_error)?;
        if let Some(clause) = opt_clause {
            inst.add_clause(clause)
        }
    }
}

/// Parses the p-line of a CNF file
fn parse_p_line(input: &str) -> IResult<&str, Preamble, Error> {
    let full_p_line = String::from(input);
    let (input, _) = terminated::<_, _, _, NomError<_>, _, _>(tag("p"), multispace1)(input)
        .map_err(|e| e.map(|_| Error::PLine(full_p_line.clone())))?;
    let (input, _) = terminated::<_, _, _, NomError<_>, _, _>(tag("cnf"), multispace1)(input)
        .map_err(|e| e.map(|_| Error::PLine(full_p_line.clone())))?;
    let (input, (n_vars, _, n_clauses)) =
        tuple::<_, _, NomError<_>, _>((nom_u64, multispace1, nom_u64))(input)
            .map_err(|e| e.map(|_| Error::PLine(full_p_line)))?;
    // Safe cast to usize
    let n_vars = match usize::try_from(n_vars) {
        Ok(v) => v,
        Err(_) => return Err(nom::Err::Error(Error::PValTooLarge(n_vars))),
    };
    let n_clauses = match usize::try_from(n_clauses) {
        Ok(v) => v,
        Err(_) => return Err(nom::Err::Error(Error::PValTooLarge(n_clauses))),
    };
    Ok((input, Preamble { n_vars, n_clauses }))
}

/// Parses a CNF line, either a comment or a clause
fn parse_cnf_line(input: &str) -> IResult<&str, Option<Clause>, Error> {
    let (input, _) = multispace0(input)?;
    if input.trim().is_empty() {
        // Tolerate empty lines
        return Ok((input, None));
    }
    match tag::<&str, &str, NomError<&str>>("c")(input) {
        Ok((input, _)) => Ok((input, None)),
        Err(_) => {
            // Line is not a comment
            let (input, clause) =
                terminated(separated_list0(multispace1, parse_lit), parse_clause_ending)(input)?;
            Ok((input, Some(Clause::from_iter(clause))))
        }
    }
}

/// Nuclear parser for literal
fn parse_lit(input: &str) -> IResult<&str, Lit, Error> {
    map_res(nom_i32, Lit::from_dimacs)(input)
        .map_err(|e| e.map(|e: NomError<&str>| Error::Lit(String::from(e.input))))
}

/// Parses the end of a clause
/// A '0' followed by a linebreak, as well as a '0' followed by
/// whitespace or only a linebreak are treated as valid clause endings.
/// This is more lean than the file format spec.
fn parse_clause_ending(input: &str) -> IResult<&str, &str, Error> {
    recognize(pair(
        multispace0,
        alt((
            recognize(all_consuming(success(""))),
            recognize(all_consuming(tag("0"))),
            recognize(terminated(tag("0"), line_ending)),
            recognize(terminated(tag("0"), multispace1)),
            recognize(line_ending),
        )),
    ))(input)
    .map_err(|e| e.map(|e: NomError<&str>| Error::ClauseEnding(String::from(e.input))))
}

/// Writes a CNF to a DIMACS CNF file
pub fn write_cnf_annotated<W: Write>(
    writer: &mut W,
    cnf: Cnf,
    max_var: Option<Var>,
) -> Result<(), io::Error> {
    writeln!(writer, "c CNF file written by stairsat")?;
    writeln!(
        writer,
        "p cnf {} {}",
        if let Some(max_var) = max_var {
            max_var.to_dimacs()
        } else {
            0
        },
        cnf.len()
    )?;
    cnf.into_iter()
        .try_for_each(|cl| write_clause(writer, cl))?;
    writer.flush()
}

fn write_clause<W: Write>(writer: &mut W, clause: Clause) -> Result<(), io::Error> {
    clause
        .into_iter()
        .try_for_each(|l| write!(writer, "{} ", l.to_dimacs()))?;
    writeln!(writer, "0")
}

#[cfg(test)]
mod tests {
    use super::{
        parse_clause_ending, parse_cnf_line, parse_lit, parse_p_line, write_cnf_annotated, Error,
        Preamble,
    };
    use crate::{
        clause,
        instances::{Cnf, SatInstance},
        lit, var,
    };
    use nom::error::ErrorKind;

    #[test]
    fn parse_lit_pos_neg() {
        assert_eq!(parse_lit("15 "), Ok((" ", lit![14])));
        assert_eq!(parse_lit("-42 "), Ok((" ", !lit![41])));
        assert_eq!(
            parse_lit("abc"),
            Err(nom::Err::Error(Error::Lit(String::from("abc"))))
        );
    }

    #[test]
    fn parse_p_line_cnf() {
        assert_eq!(
            parse_p_line("p cnf 23 42"),
            Ok((
                "",
                Preamble {
                    n_vars: 23,
                    n_clauses: 42
                }
            ))
        );
        assert_eq!(
            parse_p_line("p wcnf 23 42 52"),
            Err(nom::Err::Error(Error::PLine(String::from(
                "p wcnf 23 42 52"
            ))))
        );
    }

    #[test]
    fn parse_clause_endings() {
        assert_eq!(parse_clause_ending("0"), Ok(("", "0")));
        assert_eq!(parse_clause_ending("0 test"), Ok(("test", "0 ")));
        assert_eq!(parse_clause_ending("0\n"), Ok(("", "0\n")));
        assert_eq!(parse_clause_ending("\n"), Ok(("", "\n")));
        assert_eq!(
            parse_clause_ending("test"),
            Err(nom::Err::Error(Error::ClauseEnding(String::from("test"))))
        );
    }

    #[test]
    fn parse_cnf_line_variants() {
        let (_, cl) = parse_cnf_line("c this is a comment").unwrap();
        assert_eq!(cl, None);
        let (_, cl) = parse_cnf_line("1 -2 3 0\n").unwrap();
        assert_eq!(cl, Some(clause![lit![0], !lit![1], lit![2]]));
        let (_, cl) = parse_cnf_line("42 -45 -3 0").unwrap();
        assert_eq!(cl, Some(clause![lit![41], !lit![44], !lit![2]]));
    }

    #[test]
    fn write_parse_cnf() {
        let mut true_cnf = Cnf::new();
        true_cnf.add_binary(lit![0], !lit![2]);
        true_cnf.add_ternary(lit![1], lit![2], !lit![0]);

        let mut buf = Vec::new();
        write_cnf_annotated(&mut buf, true_cnf.clone(), Some(var![2])).unwrap();

        let parsed: SatInstance = super::parse_cnf(&buf[..]).unwrap();
        let (parsed_cnf, _) = parsed.as_cnf();
        assert_eq!(parsed_cnf, true_cnf);
    }

    #[test]
    fn parse_no_preamble() {
        let res = super::parse_cnf::<_, crate::instances::BasicVarManager>(&b"c only comments\n"[..]);
        assert_eq!(res.unwrap_err(), Error::PreambleNoEnd);
    }

    #[test]
    fn nom_error_eq() {
        assert_eq!(
            Error::NomError(String::from("abc"), ErrorKind::Tag),
            Error::NomError(String::from("abc"), ErrorKind::Tag)
        );
    }
}

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{self as parser, multispace0, multispace1};
use nom::combinator::{eof, map, rest, verify};
use nom::error::VerboseError;
use nom::multi::separated_list1;
use nom::sequence::{pair, preceded};
use nom::{Finish, IResult};

/// A parsed extraction request, ready to dispatch with
/// [`execute`](crate::execute).
///
/// The textual forms accepted by [`parse_request`] are
/// `column <name>`, `columns <a>, <b>`, `rows <n>, <m>`,
/// `find <keyword>` and `all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Extract one column by header name.
    Column { name: String },
    /// Extract several columns, in the order they were asked for.
    Columns { names: Vec<String> },
    /// Extract data rows by number, as the user typed them.
    Rows { numbers: Vec<usize> },
    /// Extract rows containing a keyword.
    Find { keyword: String },
    /// Dump the whole file.
    All,
}

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// The trailing free text of a command: everything left on the line,
/// trimmed, required non-empty. Used for single column names and keywords,
/// which may contain spaces.
fn rest_text(i: &str) -> ParseResult<'_, String> {
    map(verify(rest, |s: &str| !s.trim().is_empty()), |s: &str| {
        s.trim().to_string()
    })(i)
}

/// A comma-separated list of column names, each trimmed.
fn name_list(i: &str) -> ParseResult<'_, Vec<String>> {
    separated_list1(
        parser::char(','),
        map(
            verify(take_while1(|c| c != ','), |s: &str| !s.trim().is_empty()),
            |s: &str| s.trim().to_string(),
        ),
    )(i)
}

/// A comma-separated list of row numbers.
fn number_list(i: &str) -> ParseResult<'_, Vec<usize>> {
    separated_list1(
        pair(parser::char(','), multispace0),
        map(parser::u64, |n| n as usize),
    )(i)
}

/// Parse a command string into a [`Request`].
pub fn parse_request(input: &str) -> anyhow::Result<Request> {
    fn command(i: &str) -> ParseResult<'_, Request> {
        let (i, _) = multispace0(i)?;
        let (i, request) = alt((
            map(
                preceded(pair(tag("columns"), multispace1), name_list),
                |names| Request::Columns { names },
            ),
            map(
                preceded(pair(tag("column"), multispace1), rest_text),
                |name| Request::Column { name },
            ),
            map(
                preceded(pair(tag("rows"), multispace1), number_list),
                |numbers| Request::Rows { numbers },
            ),
            map(preceded(pair(tag("find"), multispace1), rest_text), |kw| {
                Request::Find { keyword: kw }
            }),
            map(tag("all"), |_| Request::All),
        ))(i)?;
        let (i, _) = multispace0(i)?;
        let (i, _) = eof(i)?;
        Ok((i, request))
    }
    let (_, request) = command(input)
        .finish()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(request)
}

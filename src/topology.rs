// imports
use crate::error::{Error, Result};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// A clique or a community: the line index it was read from and its members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub index: usize,
    pub members: Vec<String>,
}

/// Reads a topology file, one literal-encoded collection of user ids per line.
/// Blank lines still count as (empty) groups so that indices match line numbers.
pub fn read_groups(path: &Path) -> Result<Vec<Group>> {

    let lines = BufReader::new(File::open(path)?).lines();

    let mut groups = Vec::new();
    for (index, line) in lines.enumerate() {
        let members = parse_group(&line?).map_err(|reason| Error::Topology {
            path: path.to_path_buf(),
            line: index + 1,
            reason,
        })?;
        groups.push(Group { index, members });
    }

    Ok(groups)
}

/// Parses one line such as `[12, 34]`, `set([12L, 34L])` or `('a', 'b')`.
/// Duplicated ids are kept once, in first-seen order.
pub fn parse_group(line: &str) -> std::result::Result<Vec<String>, String> {

    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let (_, ids) = all_consuming(group)(line).map_err(|e| e.to_string())?;

    let mut members: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !members.contains(&id) {
            members.push(id);
        }
    }
    Ok(members)
}

fn ws<'a, O>(inner: impl FnMut(&'a str) -> IResult<&'a str, O>) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

// integers may carry the `L` suffix of long literals
fn integer_id(input: &str) -> IResult<&str, String> {
    map(
        terminated(recognize(pair(opt(char('-')), digit1)), opt(alt((char('L'), char('l'))))),
        |digits: &str| digits.to_string(),
    )(input)
}

fn quoted_id(input: &str) -> IResult<&str, String> {
    map(
        preceded(
            opt(alt((char('u'), char('b')))),
            alt((
                delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
                delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
            )),
        ),
        |id: &str| id.to_string(),
    )(input)
}

fn items(input: &str) -> IResult<&str, Vec<String>> {
    terminated(
        separated_list0(char(','), ws(alt((integer_id, quoted_id)))),
        opt(ws(char(','))),
    )(input)
}

fn collection(input: &str) -> IResult<&str, Vec<String>> {
    alt((
        delimited(ws(char('[')), items, ws(char(']'))),
        delimited(ws(char('(')), items, ws(char(')'))),
        delimited(ws(char('{')), items, ws(char('}'))),
    ))(input)
}

fn group(input: &str) -> IResult<&str, Vec<String>> {
    alt((
        delimited(
            pair(ws(alt((tag("frozenset"), tag("set")))), ws(char('('))),
            map(opt(collection), Option::unwrap_or_default),
            ws(char(')')),
        ),
        collection,
    ))(input)
}


#[cfg(test)]
mod tests {

    use super::{parse_group, read_groups, Group};
    use crate::error::Error;
    use std::io::Write;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn parses_list_and_tuple_literals() {
        assert_eq!(parse_group("[12, 34, 56]").unwrap(), ids(&["12", "34", "56"]));
        assert_eq!(parse_group("(7,)").unwrap(), ids(&["7"]));
        assert_eq!(parse_group("{ 1 , 2 }\n").unwrap(), ids(&["1", "2"]));
    }

    #[test]
    fn parses_set_wrappers_and_long_suffix() {
        assert_eq!(parse_group("set([148529707L, 2203463L])").unwrap(), ids(&["148529707", "2203463"]));
        assert_eq!(parse_group("frozenset({3, 4})").unwrap(), ids(&["3", "4"]));
        assert!(parse_group("set()").unwrap().is_empty());
    }

    #[test]
    fn parses_quoted_ids_and_dedups() {
        assert_eq!(parse_group("['alice', u'bob', \"alice\"]").unwrap(), ids(&["alice", "bob"]));
        assert!(parse_group("[]").unwrap().is_empty());
        assert!(parse_group("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_group("[1, 2").is_err());
        assert!(parse_group("1, 2").is_err());
        assert!(parse_group("[1 2]").is_err());
    }

    #[test]
    fn reads_groups_with_line_indices() {

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[1, 2]").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "set([3L])").unwrap();

        let groups = read_groups(file.path()).unwrap();
        assert_eq!(groups, vec![
            Group { index: 0, members: ids(&["1", "2"]) },
            Group { index: 1, members: vec![] },
            Group { index: 2, members: ids(&["3"]) },
        ]);
    }

    #[test]
    fn reports_failing_line_number() {

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[1, 2]").unwrap();
        writeln!(file, "[3, oops]").unwrap();

        match read_groups(file.path()) {
            Err(Error::Topology { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result {:?}", other),
        }
    }
}

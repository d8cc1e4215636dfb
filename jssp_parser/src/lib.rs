// Line based instance format, parsed with chumsky like the rest of our file formats:
//
//   # optional comment lines
//   <jobs> <machines>
//   <machine> <length> <machine> <length> ...   (one line per job)

use chumsky::{prelude::*, Parser};
use structs::{JsspInstance, JsspStep};
use thiserror::Error;

pub mod structs;

#[derive(Debug, Error)]
pub enum JsspParseError {
    #[error("ParseError occurred")]
    ParseError(Vec<Simple<char>>),
    #[error("Instance header is missing")]
    MissingHeader,
    #[error("Instance header must contain the job and machine count, found {found} values")]
    MalformedHeader { found: usize },
    #[error("Header announces {expected} jobs but {found} job lines were found")]
    JobCountMismatch { expected: usize, found: usize },
    #[error("Job {job} has an odd number of values ({values}), expected machine/length pairs")]
    OddStepList { job: usize, values: usize },
    #[error("Job {job} uses machine {machine} but the instance only has {machines} machines")]
    MachineOutOfRange {
        job: usize,
        machine: u32,
        machines: usize,
    },
    #[error("Step {step} of job {job} has zero length")]
    ZeroLength { job: usize, step: usize },
}

pub fn parse_jssp(content: &str) -> Result<JsspInstance, JsspParseError> {
    let rows = crate::instance_parser()
        .parse(content)
        .map_err(JsspParseError::ParseError)?;

    let mut rows = rows.into_iter();
    let header = rows.next().ok_or(JsspParseError::MissingHeader)?;
    let (jobs, machines) = match header.as_slice() {
        [jobs, machines] => (*jobs as usize, *machines as usize),
        _ => {
            return Err(JsspParseError::MalformedHeader {
                found: header.len(),
            })
        }
    };

    let steps = rows
        .enumerate()
        .map(|(job, row)| job_steps(job, &row, machines))
        .collect::<Result<Vec<_>, _>>()?;

    if steps.len() != jobs {
        return Err(JsspParseError::JobCountMismatch {
            expected: jobs,
            found: steps.len(),
        });
    }

    Ok(JsspInstance {
        jobs,
        machines,
        steps,
    })
}

fn job_steps(job: usize, row: &[u32], machines: usize) -> Result<Vec<JsspStep>, JsspParseError> {
    if row.len() % 2 != 0 {
        return Err(JsspParseError::OddStepList {
            job,
            values: row.len(),
        });
    }

    row.chunks_exact(2)
        .enumerate()
        .map(|(step, pair)| {
            let (machine, length) = (pair[0], pair[1]);

            if machine as usize >= machines {
                return Err(JsspParseError::MachineOutOfRange {
                    job,
                    machine,
                    machines,
                });
            }
            if length == 0 {
                return Err(JsspParseError::ZeroLength { job, step });
            }

            Ok(JsspStep { machine, length })
        })
        .collect()
}

pub(crate) fn inline_whitespace() -> impl Parser<char, (), Error = Simple<char>> + Clone {
    one_of(" \t").repeated().ignored()
}

pub(crate) fn comment_parser() -> impl Parser<char, (), Error = Simple<char>> + Clone {
    let comment = just('#')
        .then(filter(|c: &char| *c != '\n' && *c != '\r').repeated())
        .ignored();

    inline_whitespace()
        .then(comment.or_not())
        .then(text::newline())
        .ignored()
        .repeated()
        .ignored()
        .labelled("comments")
}

pub(crate) fn row_parser() -> impl Parser<char, Vec<u32>, Error = Simple<char>> + Clone {
    let number = text::int(10)
        .try_map(|digits: String, span| {
            digits
                .parse::<u32>()
                .map_err(|err| Simple::custom(span, format!("{digits}: {err}")))
        })
        .labelled("number");

    inline_whitespace()
        .ignore_then(
            number
                .then_ignore(inline_whitespace())
                .repeated()
                .at_least(1),
        )
        .labelled("row")
}

pub(crate) fn instance_parser() -> impl Parser<char, Vec<Vec<u32>>, Error = Simple<char>> {
    let line_break = inline_whitespace()
        .then(text::newline())
        .repeated()
        .at_least(1)
        .ignored();

    comment_parser()
        .ignore_then(row_parser().separated_by(line_break).allow_trailing())
        .then_ignore(inline_whitespace())
        .then_ignore(end())
}

use chumsky::prelude::*;
use miette::*;
use rayon::prelude::*;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Multiply,
}

impl Operation {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'+' => Some(Operation::Add),
            b'*' => Some(Operation::Multiply),
            _ => None,
        }
    }

    pub fn apply(self, numbers: impl IntoIterator<Item = u64>) -> u64 {
        match self {
            Operation::Add => numbers.into_iter().sum(),
            Operation::Multiply => numbers.into_iter().product(),
        }
    }
}

/// How the digits of a block turn into operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingMode {
    /// Every row of a block holds one whole number.
    Rows,
    /// Every column of a block, read top to bottom, holds one number.
    Columns,
}

/// Number rows and the operator row, padded with spaces to a common width.
#[derive(Debug, Clone)]
pub struct Worksheet {
    rows: Vec<Vec<u8>>,
    operators: Vec<u8>,
    width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub operation: Operation,
    pub numbers: Vec<u64>,
}

impl Problem {
    pub fn solve(&self) -> u64 {
        self.operation.apply(self.numbers.iter().copied())
    }
}

impl Worksheet {
    pub fn new(lines: &[&str]) -> Result<Self> {
        let mut lines: Vec<&str> = lines.to_vec();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let Some(operators) = lines.pop() else {
            return Err(miette!("Worksheet has no operator row"));
        };

        let width = lines
            .iter()
            .map(|line| line.len())
            .chain([operators.len()])
            .max()
            .unwrap_or_default();
        let pad = |line: &str| {
            let mut bytes = line.as_bytes().to_vec();
            bytes.resize(width, b' ');
            bytes
        };

        Ok(Self {
            rows: lines.iter().map(|line| pad(line)).collect(),
            operators: pad(operators),
            width,
        })
    }

    fn blank_column(&self, column: usize) -> bool {
        self.rows
            .iter()
            .chain([&self.operators])
            .all(|row| row[column] == b' ')
    }

    /// Column spans between all-space separator columns.
    fn blocks(&self) -> Vec<Range<usize>> {
        let mut blocks = Vec::new();
        let mut start = None;
        for column in 0..self.width {
            match (start, self.blank_column(column)) {
                (None, false) => start = Some(column),
                (Some(from), true) => {
                    blocks.push(from..column);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(from) = start {
            blocks.push(from..self.width);
        }
        blocks
    }

    fn problem(&self, block: Range<usize>, mode: ReadingMode) -> Result<Option<Problem>> {
        let Some(operation) = self.operators[block.clone()]
            .iter()
            .find_map(|&byte| Operation::from_byte(byte))
        else {
            return Ok(None);
        };

        let numbers = match mode {
            ReadingMode::Rows => self
                .rows
                .iter()
                .filter_map(|row| read_number(row[block.clone()].iter().copied()).transpose())
                .collect::<Result<Vec<_>>>()?,
            ReadingMode::Columns => block
                .filter_map(|column| read_number(self.rows.iter().map(|row| row[column])).transpose())
                .collect::<Result<Vec<_>>>()?,
        };
        if numbers.is_empty() {
            return Ok(None);
        }

        Ok(Some(Problem { operation, numbers }))
    }

    /// Blocks without an operator or without any digits are skipped.
    pub fn problems(&self, mode: ReadingMode) -> Result<Vec<Problem>> {
        self.blocks()
            .into_iter()
            .filter_map(|block| self.problem(block, mode).transpose())
            .collect()
    }

    pub fn grand_total(&self, mode: ReadingMode) -> Result<u64> {
        let problems = self.problems(mode)?;
        tracing::debug!(problems = problems.len(), ?mode, "read worksheet");

        Ok(problems.par_iter().map(Problem::solve).sum())
    }
}

/// Digits in reading order, spaces ignored. `None` when there are no digits.
fn read_number(bytes: impl Iterator<Item = u8>) -> Result<Option<u64>> {
    let mut number = None;
    for byte in bytes.filter(|&byte| byte != b' ') {
        if !byte.is_ascii_digit() {
            return Err(miette!("Unexpected '{}' in worksheet", byte as char));
        }
        number = Some(number.unwrap_or(0) * 10 + u64::from(byte - b'0'));
    }
    Ok(number)
}

pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<&'a str>, extra::Err<Rich<'a, char>>> {
    none_of("\r\n")
        .repeated()
        .to_slice()
        .separated_by(text::newline())
        .collect()
}

pub fn parse(input: &str) -> Result<Worksheet> {
    let lines = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    Worksheet::new(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_blocks_on_blank_columns() -> Result<()> {
        let sheet = parse("12  3\n 4 56\n+  * \n")?;
        assert_eq!(sheet.blocks(), vec![0..2, 3..5]);
        Ok(())
    }

    #[test]
    fn pads_ragged_lines() -> Result<()> {
        let sheet = parse("12 3\n4\n*  +")?;
        assert_eq!(
            sheet.problems(ReadingMode::Rows)?,
            vec![
                Problem {
                    operation: Operation::Multiply,
                    numbers: vec![12, 4]
                },
                Problem {
                    operation: Operation::Add,
                    numbers: vec![3]
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn reads_columns_top_to_bottom() -> Result<()> {
        let sheet = parse("12\n34\n+ ")?;
        assert_eq!(sheet.grand_total(ReadingMode::Columns)?, 13 + 24);
        Ok(())
    }

    #[test]
    fn skips_blocks_without_operator() -> Result<()> {
        let sheet = parse("1 2\n3 4\n+  ")?;
        assert_eq!(sheet.grand_total(ReadingMode::Rows)?, 4);
        Ok(())
    }

    #[test]
    fn skips_operator_without_numbers() -> Result<()> {
        let sheet = parse("1  \n+ *")?;
        assert_eq!(sheet.problems(ReadingMode::Rows)?.len(), 1);
        assert_eq!(sheet.grand_total(ReadingMode::Rows)?, 1);
        assert_eq!(sheet.grand_total(ReadingMode::Columns)?, 1);
        Ok(())
    }

    #[test]
    fn missing_operator_row_is_an_error() {
        assert!(parse("\n\n").is_err());
    }

    #[test]
    fn rejects_stray_characters() {
        assert!(parse("1x\n+ ").and_then(|sheet| sheet.grand_total(ReadingMode::Rows)).is_err());
    }
}

//! An interactive menu-driven calculator.
//!
//! The shell keeps a *main* and an *additional* matrix. Unary operations act
//! on the main matrix, binary operations use the additional matrix as right
//! operand. Matrices are entered row by row, read from a file or generated
//! randomly; results can be stored back as either matrix.

use std::{
    fs,
    io::{self, BufRead, Write},
    mem,
};

use rand::Rng;
use tracing::{debug, info};

use crate::{
    parser::{parse_decimal, parse_matrix, parse_row},
    printer::{MatrixPrinter, SolutionPrinter},
    settings::CalculatorSettings,
    tensors::matrix::{Matrix, MatrixError},
};

/// The items of the main menu, numbered from 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Trace = 1,
    Transpose,
    Addition,
    Difference,
    Multiplication,
    ScalarMultiplication,
    Determinant,
    LinearSystem,
    MainMatrixInput,
    AdditionalMatrixInput,
    Swap,
    PrintMain,
    PrintAdditional,
    RandomGeneration,
    PrintOperations,
    Exit,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::Trace,
        Operation::Transpose,
        Operation::Addition,
        Operation::Difference,
        Operation::Multiplication,
        Operation::ScalarMultiplication,
        Operation::Determinant,
        Operation::LinearSystem,
        Operation::MainMatrixInput,
        Operation::AdditionalMatrixInput,
        Operation::Swap,
        Operation::PrintMain,
        Operation::PrintAdditional,
        Operation::RandomGeneration,
        Operation::PrintOperations,
        Operation::Exit,
    ];

    pub fn from_number(n: u32) -> Option<Operation> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn number(&self) -> u32 {
        *self as u32
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::Trace => "Compute the trace of the matrix",
            Operation::Transpose => "Transpose the matrix",
            Operation::Addition => "Add another matrix to the matrix",
            Operation::Difference => "Subtract another matrix from the matrix",
            Operation::Multiplication => "Multiply the matrix by another matrix",
            Operation::ScalarMultiplication => "Multiply the matrix by a number",
            Operation::Determinant => "Compute the determinant of the matrix",
            Operation::LinearSystem => "Solve a system of linear equations with Cramer's rule",
            Operation::MainMatrixInput => "Enter the main matrix",
            Operation::AdditionalMatrixInput => "Enter the additional matrix",
            Operation::Swap => "Swap the main and the additional matrix",
            Operation::PrintMain => "Print the main matrix",
            Operation::PrintAdditional => "Print the additional matrix",
            Operation::RandomGeneration => "Change the random generation settings",
            Operation::PrintOperations => "Print the list of operations",
            Operation::Exit => "Exit",
        }
    }

    pub fn requires_main(&self) -> bool {
        matches!(
            self,
            Operation::Trace
                | Operation::Transpose
                | Operation::Addition
                | Operation::Difference
                | Operation::Multiplication
                | Operation::ScalarMultiplication
                | Operation::Determinant
                | Operation::LinearSystem
                | Operation::Swap
        )
    }

    pub fn requires_additional(&self) -> bool {
        matches!(
            self,
            Operation::Addition
                | Operation::Difference
                | Operation::Multiplication
                | Operation::Swap
        )
    }
}

/// The calculator session. Input is read line by line from `input`; the end
/// of the input ends the session.
pub struct Shell<R: BufRead, W: Write, G: Rng> {
    input: R,
    output: W,
    rng: G,
    settings: CalculatorSettings,
    main: Matrix,
    additional: Matrix,
}

impl<R: BufRead, W: Write, G: Rng> Shell<R, W, G> {
    pub fn new(input: R, output: W, rng: G, settings: CalculatorSettings) -> Self {
        Shell {
            input,
            output,
            rng,
            settings,
            main: Matrix::default(),
            additional: Matrix::default(),
        }
    }

    pub fn main_matrix(&self) -> &Matrix {
        &self.main
    }

    pub fn additional_matrix(&self) -> &Matrix {
        &self.additional
    }

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Run the menu loop until the user exits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        match self.run_loop() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("End of input");
                Ok(())
            }
            r => r,
        }
    }

    fn run_loop(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "=== Matrix calculator {} ===",
            env!("MATRIX_CALCULATOR_VERSION")
        )?;
        writeln!(
            self.output,
            "The calculator keeps a main matrix and an additional matrix. The additional matrix is the right operand of addition, subtraction and multiplication."
        )?;
        writeln!(
            self.output,
            "Matrices have at most {} rows and {} columns. Use `.` or `,` as decimal separator.",
            self.settings.limits.max_rows, self.settings.limits.max_cols
        )?;
        self.print_operations()?;

        loop {
            writeln!(
                self.output,
                "Enter the number of a menu item ({} to list the operations):",
                Operation::PrintOperations.number()
            )?;
            let n = self.read_number(1, Operation::ALL.len() as i64)?;
            let Some(op) = Operation::from_number(n as u32) else {
                continue;
            };

            if op == Operation::Exit {
                writeln!(self.output, "Bye!")?;
                return Ok(());
            }

            self.execute(op)?;
        }
    }

    /// Perform a single operation, asking for missing matrices first.
    pub fn execute(&mut self, op: Operation) -> io::Result<()> {
        info!("Executing {:?}", op);

        if op.requires_main() && self.main.is_empty() {
            writeln!(self.output, "This operation needs the main matrix.")?;
            self.main = self.read_matrix()?;
        }

        if op.requires_additional() && self.additional.is_empty() {
            writeln!(self.output, "This operation needs the additional matrix.")?;
            self.additional = self.read_matrix()?;
        }

        match op {
            Operation::Trace => match self.main.trace() {
                Ok(t) => self.print_info(&format!("Trace = {}", t)),
                Err(e) => self.print_error(e),
            },
            Operation::Transpose => {
                let t = self.main.transpose();
                self.offer_result(t, "Result: the transposed matrix")
            }
            Operation::Addition => {
                let r = self.main.add(&self.additional);
                self.handle_result(r, "Result: the sum of the main and the additional matrix")
            }
            Operation::Difference => {
                let r = self.main.subtract(&self.additional);
                self.handle_result(
                    r,
                    "Result: the difference of the main and the additional matrix",
                )
            }
            Operation::Multiplication => {
                let r = self.main.multiply(&self.additional);
                self.handle_result(
                    r,
                    "Result: the product of the main and the additional matrix",
                )
            }
            Operation::ScalarMultiplication => {
                writeln!(self.output, "Enter the number to multiply the matrix with:")?;
                let c = loop {
                    let line = self.read_line()?;
                    match parse_decimal(line.trim()) {
                        Some(c) => break c,
                        None => writeln!(self.output, "Invalid number, please try again.")?,
                    }
                };
                let r = self.main.scale(&c);
                self.handle_result(
                    r,
                    &format!("Result: the product of the main matrix and {}", c),
                )
            }
            Operation::Determinant => match self.main.det() {
                Ok(d) => self.print_info(&format!("Determinant = {}", d)),
                Err(e) => self.print_error(e),
            },
            Operation::LinearSystem => match self.main.solve_cramer_with(&self.settings.cramer) {
                Ok(s) => self.print_info(&SolutionPrinter::new(&s).to_string()),
                Err(e) => self.print_error(e),
            },
            Operation::MainMatrixInput => {
                self.main = self.read_matrix()?;
                Ok(())
            }
            Operation::AdditionalMatrixInput => {
                self.additional = self.read_matrix()?;
                Ok(())
            }
            Operation::Swap => {
                mem::swap(&mut self.main, &mut self.additional);
                self.print_info("The main and the additional matrix were swapped.")
            }
            Operation::PrintMain => {
                let m = mem::take(&mut self.main);
                let r = self.print_matrix(&m, "The main matrix");
                self.main = m;
                r
            }
            Operation::PrintAdditional => {
                let m = mem::take(&mut self.additional);
                let r = self.print_matrix(&m, "The additional matrix");
                self.additional = m;
                r
            }
            Operation::RandomGeneration => self.change_random_settings(),
            Operation::PrintOperations => self.print_operations(),
            Operation::Exit => Ok(()),
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "The input has ended",
            ));
        }
        Ok(line)
    }

    /// Ask for an integer in `[min, max]` until a valid one is entered.
    fn read_number(&mut self, min: i64, max: i64) -> io::Result<i64> {
        loop {
            let line = self.read_line()?;
            match line.trim().parse::<i64>() {
                Ok(n) if n < min => writeln!(self.output, "The number may not be smaller than {}.", min)?,
                Ok(n) if n > max => writeln!(self.output, "The number may not be larger than {}.", max)?,
                Ok(n) => return Ok(n),
                Err(_) => writeln!(self.output, "Invalid input: please enter an integer.")?,
            }
        }
    }

    fn read_matrix(&mut self) -> io::Result<Matrix> {
        writeln!(self.output, "=== Matrix input ===")?;
        writeln!(
            self.output,
            "1. Enter the matrix row by row\n2. Read the matrix from a file\n3. Generate a random matrix"
        )?;

        match self.read_number(1, 3)? {
            1 => self.read_matrix_from_input(),
            2 => self.read_matrix_from_file(),
            _ => self.generate_matrix(),
        }
    }

    fn read_dimensions(&mut self) -> io::Result<(u32, u32)> {
        let limits = self.settings.limits;
        writeln!(
            self.output,
            "Enter the number of rows (at most {}):",
            limits.max_rows
        )?;
        let nrows = self.read_number(1, limits.max_rows as i64)? as u32;
        writeln!(
            self.output,
            "Enter the number of columns (at most {}):",
            limits.max_cols
        )?;
        let ncols = self.read_number(1, limits.max_cols as i64)? as u32;
        Ok((nrows, ncols))
    }

    fn read_matrix_from_input(&mut self) -> io::Result<Matrix> {
        let (nrows, ncols) = self.read_dimensions()?;
        let mut m = Matrix::new(nrows, ncols);

        for i in 0..nrows {
            writeln!(
                self.output,
                "Row {}: enter {} numbers separated by spaces:",
                i + 1,
                ncols
            )?;
            loop {
                let line = self.read_line()?;
                match parse_row(&line, i as usize + 1) {
                    Ok(r) if r.len() == ncols as usize => {
                        m.set_row(i, &r);
                        break;
                    }
                    Ok(r) => writeln!(
                        self.output,
                        "Expected {} numbers, got {}. Please enter the row again.",
                        ncols,
                        r.len()
                    )?,
                    Err(e) => writeln!(self.output, "{}. Please enter the row again.", e)?,
                }
            }
        }

        Ok(m)
    }

    fn read_matrix_from_file(&mut self) -> io::Result<Matrix> {
        writeln!(
            self.output,
            "The file must contain one row per line, with the numbers separated by spaces."
        )?;

        loop {
            writeln!(self.output, "Enter the path of the file:")?;
            let line = self.read_line()?;
            let path = line.trim();

            let text = match fs::read_to_string(path) {
                Ok(t) => t,
                Err(e) => {
                    self.print_info(&format!("Cannot read `{}`: {}", path, e))?;
                    continue;
                }
            };

            match parse_matrix(&text, &self.settings.limits) {
                Ok(m) => {
                    debug!("Read a {}x{} matrix from {}", m.nrows(), m.ncols(), path);
                    self.print_info("The matrix was read from the file.")?;
                    return Ok(m);
                }
                Err(e) => self.print_info(&format!("The file is invalid: {}", e))?,
            }
        }
    }

    fn generate_matrix(&mut self) -> io::Result<Matrix> {
        let (nrows, ncols) = self.read_dimensions()?;
        let m = Matrix::random(nrows, ncols, &self.settings.random, &mut self.rng);
        self.print_matrix(&m, "The matrix was generated.")?;
        Ok(m)
    }

    fn change_random_settings(&mut self) -> io::Result<()> {
        let r = self.settings.random;
        writeln!(self.output, "=== Random generation settings ===")?;
        writeln!(
            self.output,
            "1. Change the minimum value (now {})\n2. Change the exclusive maximum value (now {})\n3. {} fractional numbers",
            r.min(),
            r.max(),
            if r.fractional() { "Disallow" } else { "Allow" }
        )?;

        let new = match self.read_number(1, 3)? {
            1 => {
                writeln!(self.output, "Enter the new minimum:")?;
                let min = self.read_number(i32::MIN as i64, r.max() as i64 - 1)?;
                r.with_min(min as i32)
            }
            2 => {
                writeln!(self.output, "Enter the new exclusive maximum:")?;
                let max = self.read_number(r.min() as i64 + 1, i32::MAX as i64)?;
                r.with_max(max as i32)
            }
            _ => Ok(r.with_fractional(!r.fractional())),
        };

        match new {
            Ok(new) => {
                self.settings.random = new;
                self.print_info(&format!(
                    "Saved: values in [{}, {}), fractional numbers {}.",
                    new.min(),
                    new.max(),
                    if new.fractional() { "allowed" } else { "not allowed" }
                ))
            }
            Err(e) => self.print_info(&e),
        }
    }

    fn handle_result(&mut self, r: Result<Matrix, MatrixError>, title: &str) -> io::Result<()> {
        match r {
            Ok(m) => self.offer_result(m, title),
            Err(e) => self.print_error(e),
        }
    }

    /// Print a result and let the user store it as the main or additional matrix.
    fn offer_result(&mut self, m: Matrix, title: &str) -> io::Result<()> {
        self.print_matrix(&m, title)?;
        writeln!(
            self.output,
            "1. Store the result as the main matrix\n2. Store the result as the additional matrix\n3. Discard the result"
        )?;

        match self.read_number(1, 3)? {
            1 => {
                self.main = m;
                self.print_info("The result is now the main matrix.")
            }
            2 => {
                self.additional = m;
                self.print_info("The result is now the additional matrix.")
            }
            _ => Ok(()),
        }
    }

    fn print_matrix(&mut self, m: &Matrix, title: &str) -> io::Result<()> {
        if m.is_empty() {
            return self.print_info("The matrix is empty!");
        }

        writeln!(self.output, "======")?;
        writeln!(self.output, "{}", title)?;
        writeln!(
            self.output,
            "{}",
            MatrixPrinter::new(m).with_options(self.settings.print)
        )?;
        writeln!(self.output, "======")
    }

    fn print_error(&mut self, e: MatrixError) -> io::Result<()> {
        debug!("Operation failed: {:?}", e);
        self.print_info(&e.to_string())
    }

    fn print_info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "=====\n{}\n=====", message)
    }

    fn print_operations(&mut self) -> io::Result<()> {
        writeln!(self.output, "Available operations:")?;
        for op in Operation::ALL {
            writeln!(self.output, "{}. {}", op.number(), op.description())?;
        }
        Ok(())
    }
}

impl<W: Write, G: Rng> Shell<io::Cursor<Vec<u8>>, W, G> {
    /// Create a shell that reads the given script instead of interactive input.
    pub fn from_script(script: &str, output: W, rng: G, settings: CalculatorSettings) -> Self {
        Shell::new(io::Cursor::new(script.as_bytes().to_vec()), output, rng, settings)
    }
}

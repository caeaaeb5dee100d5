use crate::app::render;
use crate::core::planner::CoursePlanner;
use crate::domain::model::OutputFormat;
use crate::domain::ports::{CourseStore, Storage};
use crate::utils::error::{PlannerError, Result};
use std::io::{BufRead, Write};

pub const WELCOME: &str = "Welcome to the course planner.";
pub const FAREWELL: &str = "Thank you for using the course planner!";
pub const NOT_LOADED: &str = "Please load data first using option 1.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    List,
    Details,
    Exit,
}

impl MenuChoice {
    /// Interpret one line typed at the menu prompt.
    pub fn parse(input: &str) -> std::result::Result<Self, String> {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(1) => Ok(MenuChoice::Load),
            Ok(2) => Ok(MenuChoice::List),
            Ok(3) => Ok(MenuChoice::Details),
            Ok(9) => Ok(MenuChoice::Exit),
            Ok(n) => Err(format!("{} is not a valid option.", n)),
            Err(_) => Err(format!("Error: '{}' is not a valid option.", input)),
        }
    }
}

/// The interactive loop: prompts on `output`, answers read from `input`.
pub struct Menu<'a, S: CourseStore, F: Storage, R: BufRead, W: Write> {
    planner: &'a mut CoursePlanner<S, F>,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<'a, S: CourseStore, F: Storage, R: BufRead, W: Write> Menu<'a, S, F, R, W> {
    pub fn new(planner: &'a mut CoursePlanner<S, F>, input: R, output: W) -> Self {
        Self {
            planner,
            input,
            output,
            format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run until `9` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME)?;

        loop {
            self.display_menu()?;
            let Some(line) = self.read_line()? else {
                tracing::debug!("Input closed, leaving the menu");
                writeln!(self.output)?;
                return Ok(());
            };

            match MenuChoice::parse(&line) {
                Ok(MenuChoice::Load) => self.handle_load()?,
                Ok(MenuChoice::List) => self.handle_list()?,
                Ok(MenuChoice::Details) => self.handle_details()?,
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "{}", FAREWELL)?;
                    return Ok(());
                }
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }
    }

    fn display_menu(&mut self) -> Result<()> {
        write!(
            self.output,
            "\n1. Load Data Structure.\n2. Print Course List.\n3. Print Course.\n9. Exit\nWhat would you like to do? "
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn handle_load(&mut self) -> Result<()> {
        let prompt = match self.planner.default_data_file() {
            Some(default) => format!("Enter file name [{}]: ", default),
            None => "Enter file name: ".to_string(),
        };
        let file_name = self.prompt(&prompt)?.unwrap_or_default();

        match self.planner.load(&file_name) {
            Ok(report) => {
                writeln!(self.output, "Data loaded successfully.")?;
                writeln!(
                    self.output,
                    "Loaded {} courses ({} lines skipped, {} duplicates).",
                    report.accepted, report.skipped, report.duplicates
                )?;
            }
            Err(PlannerError::IoError(e)) => {
                tracing::warn!("Could not read '{}': {}", file_name.trim(), e);
                writeln!(self.output, "Error: File not found or could not be opened")?;
            }
            Err(PlannerError::MissingConfigError { .. }) => {
                writeln!(self.output, "Error: No file name given")?;
            }
            Err(e) => {
                tracing::error!("Load failed: {} ({:?})", e, e.category());
                writeln!(self.output, "Error: {}", e.user_friendly_message())?;
            }
        }
        Ok(())
    }

    fn handle_list(&mut self) -> Result<()> {
        match self.planner.course_list() {
            Ok(courses) => {
                if self.format == OutputFormat::Text {
                    writeln!(self.output, "Here is a sample schedule:")?;
                }
                render::write_course_list(&mut self.output, &courses, self.format)?;
            }
            Err(e) => self.report_query_error(e)?,
        }
        Ok(())
    }

    fn handle_details(&mut self) -> Result<()> {
        if !self.planner.is_loaded() {
            writeln!(self.output, "{}", NOT_LOADED)?;
            return Ok(());
        }

        let number = self
            .prompt("What course do you want to know about? ")?
            .unwrap_or_default();

        match self.planner.course_details(&number) {
            Ok(course) => render::write_course_details(&mut self.output, &course, self.format)?,
            Err(e) => self.report_query_error(e)?,
        }
        Ok(())
    }

    fn report_query_error(&mut self, error: PlannerError) -> Result<()> {
        match error {
            PlannerError::NotLoaded => writeln!(self.output, "{}", NOT_LOADED)?,
            PlannerError::CourseNotFound { number } => {
                tracing::debug!("No course {}", number);
                writeln!(self.output, "Error: Course not found")?;
            }
            other => {
                tracing::error!("Query failed: {}", other);
                writeln!(self.output, "Error: {}", other.user_friendly_message())?;
            }
        }
        Ok(())
    }
}

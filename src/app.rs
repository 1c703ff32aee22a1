use crate::db::{Database, Session};
use crate::error::{Result, TodoError};
use crate::menu::{Command, HELP_TEXT};
use crate::models::format_listing;
use crate::prompt::Prompter;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::{debug, warn};

const CHOICE_PROMPT: &str = "Enter your choice >";
const TASK_PROMPT: &str = "Enter the task that should be done >";
const DELETE_ID_PROMPT: &str = "Enter the record identity that should be deleted >";
const UPDATE_ID_PROMPT: &str = "Enter the record identity that should be modified >";
const CLEAR_PROMPT: &str = "Are you sure you want to delete all the records? [yes / no] >";
pub const FAREWELL: &str = "Thank you for using smvtodo";
pub const FAREWELL_CREDITS: &str = "Made by Achyuth Jayadevan and Adharve N.A";

/// The interactive read-dispatch-commit loop
pub struct App<R, W> {
    db: Database,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(db: Database, input: R, output: W) -> Self {
        App {
            db,
            io: Prompter::new(input, output),
        }
    }

    /// Run until the user exits or input runs out
    pub fn run(&mut self) -> Result<()> {
        self.db.ensure_schema()?;
        debug!(path = %self.db.path().display(), "command loop started");
        self.io.say(HELP_TEXT)?;

        loop {
            match self.step() {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => return Ok(()),
                Err(TodoError::InputClosed) => {
                    debug!("input closed, leaving command loop");
                    self.io.say("")?;
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read one menu choice and carry it out
    pub fn step(&mut self) -> Result<ControlFlow<()>> {
        let choice = self.io.read_int(CHOICE_PROMPT)?;
        let command = match Command::try_from(choice) {
            Ok(command) => command,
            Err(e) => {
                warn!(choice, "menu choice out of range");
                self.io.say(e)?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        let flow = match self.dispatch(command) {
            Err(e) if e.is_recoverable() => {
                self.io.say(&e)?;
                ControlFlow::Continue(())
            }
            other => other?,
        };

        if flow.is_continue() {
            self.io.say("")?;
        }
        Ok(flow)
    }

    /// Run `command` in its own session and commit it
    fn dispatch(&mut self, command: Command) -> Result<ControlFlow<()>> {
        debug!(%command, "dispatching command");
        let session = self.db.begin()?;
        let flow = execute(command, &session, &mut self.io)?;
        session.commit()?;
        Ok(flow)
    }

    /// Close the database and say goodbye, handing back the output sink
    pub fn finish(self) -> Result<W> {
        let App { db, mut io } = self;
        db.close()?;
        io.say(FAREWELL)?;
        io.say(FAREWELL_CREDITS)?;
        Ok(io.into_output())
    }
}

fn execute<R: BufRead, W: Write>(
    command: Command,
    session: &Session<'_>,
    io: &mut Prompter<R, W>,
) -> Result<ControlFlow<()>> {
    match command {
        Command::Insert => {
            let description = io.read_line(TASK_PROMPT)?;
            session.insert(&description)?;
            io.say("Task has been successfully inserted")?;
        }
        Command::Delete => {
            let id = io.read_int(DELETE_ID_PROMPT)?;
            session.delete(id)?;
            io.say("Task has been successfully deleted")?;
        }
        Command::Update => {
            let id = io.read_int(UPDATE_ID_PROMPT)?;
            let description = io.read_line(TASK_PROMPT)?;
            session.update(id, &description)?;
            io.say("Task has been successfully updated")?;
        }
        Command::List => {
            let tasks = session.list_all()?;
            io.say(format_listing(&tasks))?;
        }
        Command::Clear => {
            if io.confirm(CLEAR_PROMPT)? {
                session.clear_all()?;
                io.say("All the values in the table have been reset")?;
            }
        }
        Command::Help => io.say(HELP_TEXT)?,
        Command::Exit => return Ok(ControlFlow::Break(())),
    }
    Ok(ControlFlow::Continue(()))
}

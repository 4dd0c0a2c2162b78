use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// School roster: students, teachers, classrooms, grades and attendance
#[derive(Parser, Debug)]
#[command(name = "school-roster", version, about = "School roster CLI")]
pub struct Cli {
    /// Snapshot file, read at startup and written after every change
    #[arg(long, global = true, env = "SCHOOL_ROSTER_DATA", default_value = school_roster::DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// School name shown in output
    #[arg(long, global = true, env = "SCHOOL_ROSTER_NAME", default_value = "Green Valley High School")]
    pub school: String,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Seed the sample school, print a class and two report cards, save
    Demo,
    /// Register a student
    NewStudent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
    },
    /// Register a teacher
    NewTeacher {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
    },
    /// Create a classroom (no-op if it exists)
    NewClass { class_id: String },
    /// Put a student in a classroom
    EnrollStudent { student_id: u32, class_id: String },
    /// Put a teacher in a classroom for a subject
    EnrollTeacher {
        teacher_id: u32,
        class_id: String,
        subject: String,
    },
    /// Record a grade
    Grade {
        student_id: u32,
        subject: String,
        grade: f64,
    },
    /// Record attendance (defaults to today)
    Attend {
        student_id: u32,
        status: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Print class information
    Class { class_id: String },
    /// Print a student's report card
    Report { student_id: u32 },
    /// Entity counts
    Stats,
}

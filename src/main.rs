mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use school_roster::{
    load, save, FileStore, Member, RosterError, School, StudentId, TeacherId,
};

use crate::cli::{Cli, Cmd};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("❌ error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = FileStore::new(&cli.data);
    let mut school = load(&store, &cli.school)
        .with_context(|| format!("loading {}", store.path().display()))?;

    let changed = match cli.cmd {
        Cmd::Demo => {
            run_demo(&mut school);
            true
        }
        Cmd::NewStudent { name, age } => {
            let id = school.register_student(&name, age).id();
            println!("✓ Student {} registered with ID {}", name, id);
            true
        }
        Cmd::NewTeacher { name, age } => {
            let id = school.register_teacher(&name, age).id();
            println!("✓ Teacher {} registered with ID {}", name, id);
            true
        }
        Cmd::NewClass { class_id } => {
            if school.create_classroom(&class_id).is_new() {
                println!("✓ Classroom {} created", class_id);
                true
            } else {
                println!("ℹ️  Classroom {} already exists", class_id);
                false
            }
        }
        Cmd::EnrollStudent { student_id, class_id } => {
            soft(school.assign_student_to_class(StudentId(student_id), &class_id))
        }
        Cmd::EnrollTeacher {
            teacher_id,
            class_id,
            subject,
        } => soft(school.assign_teacher_to_class(TeacherId(teacher_id), &class_id, &subject)),
        Cmd::Grade {
            student_id,
            subject,
            grade,
        } => soft(school.record_grade(StudentId(student_id), &subject, grade)),
        Cmd::Attend {
            student_id,
            status,
            date,
        } => match date {
            Some(date) => soft(school.record_attendance(StudentId(student_id), &date, status)),
            None => soft(school.record_attendance_today(StudentId(student_id), status)),
        },
        Cmd::Class { class_id } => {
            match school.display_class(&class_id) {
                Ok(summary) => println!("\n{}", summary),
                Err(e) => println!("⚠️  {}", e),
            }
            false
        }
        Cmd::Report { student_id } => {
            match school.report_card(StudentId(student_id)) {
                Ok(report) => println!("\n{}", report),
                Err(e) => println!("⚠️  {}", e),
            }
            false
        }
        Cmd::Stats => {
            println!("🏫 {}", school.name());
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("Students:   {}", school.students().count());
            println!("Teachers:   {}", school.teachers().count());
            println!("Classrooms: {}", school.classrooms().count());
            false
        }
    };

    if changed {
        save(&school, &store)
            .with_context(|| format!("saving {}", store.path().display()))?;
        println!("💾 Saved to {}", store.path().display());
    }

    Ok(())
}

/// Print a soft failure and report whether anything changed
fn soft(result: Result<(), RosterError>) -> bool {
    match result {
        Ok(()) => {
            println!("✓ Done");
            true
        }
        Err(e) => {
            println!("⚠️  {}", e);
            false
        }
    }
}

fn run_demo(school: &mut School) {
    println!("🏫 {} - sample roster", school.name());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let john = school.register_student("John Doe", 15).id();
    let jane = school.register_student("Jane Smith", 16).id();
    let sam = school.register_student("Sam Brown", 14).id();

    let robinson = school.register_teacher("Mrs. Robinson", 35).id();
    let anderson = school.register_teacher("Mr. Anderson", 40).id();

    school.create_classroom("10A");
    school.create_classroom("11B");

    let results = [
        school.assign_student_to_class(john, "10A"),
        school.assign_student_to_class(jane, "11B"),
        school.assign_student_to_class(sam, "10A"),
        school.assign_teacher_to_class(robinson, "10A", "Math"),
        school.assign_teacher_to_class(anderson, "11B", "Science"),
        school.record_attendance(john, "2024-09-29", "Present"),
        school.record_attendance(jane, "2024-09-29", "Absent"),
        school.record_attendance(sam, "2024-09-29", "Present"),
        school.record_grade(john, "Math", 85.0),
        school.record_grade(john, "Science", 78.0),
        school.record_grade(jane, "Math", 92.0),
        school.record_grade(sam, "Science", 88.0),
    ];
    for result in results {
        if let Err(e) = result {
            println!("⚠️  {}", e);
        }
    }

    match school.display_class("10A") {
        Ok(summary) => println!("\n{}", summary),
        Err(e) => println!("⚠️  {}", e),
    }

    for id in [john, jane] {
        match school.report_card(id) {
            Ok(report) => println!("\n{}", report),
            Err(e) => println!("⚠️  {}", e),
        }
    }
}

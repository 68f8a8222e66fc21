// tests/pipeline.rs
use std::fs;
use std::path::Path;

use catalog_cleaner::cli::{run, Args};
use catalog_cleaner::course_csv::HEADER;
use catalog_cleaner::database::load_course_database;

const SCRAPE: &str = "\
title,number,crn,professor,class_cap,credits,description,programs,programs-href,schedule,property_1_type,property_1_value,property_2_type,property_2_value,property_3_type,property_3_value,property_4_type,property_4_value
Intro,FILM 101,12345,Smith,20,4,A class,Film,film.html,Tue Thurs 10:10 AM – 11:30 AM Olin 203,Dist,A+H,,,,,,
Intro,FILM 101,12345,Smith,20,4,A class with a much longer description,Film,film.html,Tue Thurs 10:10 AM – 11:30 AM Olin 203,Cross-listed,LIT 101,,,,,,
null,,,,,,,,,,,,,,,,,
Workshop,FILM 330,222,Lee,12,,Hands on,Film,film.html,Mon 1:30 PM – 4:30 PM Avery 110,Screening,Wed 7:00 PM – 9:00 PM Weis Cinema,,,,,,
";

const TABLE: &str = "\
SUBJ\tCRSE\tSECTION\tCRN\tTITLE\tCREDITS\t\tPROFESSOR\tCLASS_CAP\tM\tT\tW\tTH\tF\tSAT\tSUN\tSTART\tEND\tDISTRIBUTION\tDJ
FILM\t101\t01\t12345\tIntro\t4\t\tSmith\t20\t\tT\t\tTh\t\t\t\t10:10 AM\t11:30 AM\tAA\tDJ
BIO\t201\t01\t333\tCells\t4\t\t\t18\tM\t\tW\t\t\t\t\t9:00 AM\t10:20 AM\tLS\t
\t\t\t\t\t\tand\tGarcia\t\t\t\t\t\tF\t\t\t1:30 PM\t4:30 PM\t\t
";

fn args(dir: &Path) -> Args {
    Args {
        scrape: dir.join("scrape.csv"),
        table: dir.join("table.tsv"),
        out: dir.join("results.csv"),
        cache: Some(dir.join("courses.json")),
        verbose: true,
        command: None,
    }
}

#[test]
fn merges_both_sources_into_one_csv() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scrape.csv"), SCRAPE).unwrap();
    fs::write(dir.path().join("table.tsv"), TABLE).unwrap();

    let args = args(dir.path());
    let courses = run(&args).unwrap();

    assert_eq!(courses.summary(), "3 courses (5 added, 2 merged)");

    let output = fs::read_to_string(&args.out).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], HEADER.join(","));
    // "Workshop" has no credits and is left out
    assert_eq!(lines.len(), 3);

    assert!(lines[1].starts_with(
        "FILM 101,\"Intro\",\"Smith\",4,20,Tue Thurs, 10:10, 11:30, \"Olin 203\",,,,,\"AA, DJ\",\"LIT 101\",\"\",\"A class with a much longer description\",12345,Film,film.html"
    ));
    assert!(lines[2].starts_with(
        "BIO 201 01,\"Cells\",\"Garcia\",4,18,Mon Wed, 9:00, 10:20, \"\",Fri, 13:30, 16:30, \"\",\"LS\""
    ));

    let workshop = courses.get("222").unwrap();
    assert_eq!(workshop.get_schedules().len(), 2);
    assert_eq!(workshop.get_credits(), None);
}

#[test]
fn cache_holds_every_course() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scrape.csv"), SCRAPE).unwrap();
    fs::write(dir.path().join("table.tsv"), TABLE).unwrap();

    let args = args(dir.path());
    run(&args).unwrap();

    let cached = load_course_database(args.cache.as_ref().unwrap()).unwrap();

    assert_eq!(cached.len(), 3);
    assert!(cached.contains("222"));
    assert_eq!(cached.merge_count(), 2);
}

#[test]
fn missing_table_still_writes_scrape() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scrape.csv"), SCRAPE).unwrap();

    let args = args(dir.path());
    let courses = run(&args).unwrap();

    assert_eq!(courses.summary(), "2 courses (3 added, 1 merged)");

    let output = fs::read_to_string(&args.out).unwrap();
    assert_eq!(output.lines().count(), 2);
}

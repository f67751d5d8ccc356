//! Output formatting for CLI display
//!
//! Pure formatting helpers: roster tables, the pager line, error banners,
//! record detail listings and the statistics report. Nothing here talks to
//! the API or owns state.

use crate::filters::FilterCriteria;
use crate::roster::{self, Citizen, Statistics};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Width of the longest statistics bar
const BAR_WIDTH: usize = 40;

/// Format the pager line, e.g. "1-10 of 57"
#[must_use]
pub fn pager_line(first: u64, last: u64, total: u64) -> String {
    if first == 0 {
        format!("0 of {total}")
    } else {
        format!("{first}-{last} of {total}")
    }
}

/// Format a user-facing error banner
#[must_use]
pub fn error_banner(message: &str) -> String {
    format!("{} {}", "error:".red().bold(), message.red())
}

/// Format one page of the roster as an aligned table
#[must_use]
pub fn roster_table(rows: &[&Citizen]) -> String {
    if rows.is_empty() {
        return "  (no records)".to_string();
    }

    // Column widths in characters, not bytes, so multibyte names line up
    let name_width = rows
        .iter()
        .map(|row| row.full_name().chars().count())
        .chain(["NAME".len()])
        .max()
        .unwrap_or(0);
    let city_width = rows
        .iter()
        .map(|row| roster::text(row.city.as_ref()).chars().count())
        .chain(["CITY".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    // Pad the plain header first; styling after padding keeps the escape
    // codes out of the width arithmetic
    let header = format!(
        "  {:>6}  {:<name_width$}  {:<10}  {:<city_width$}  {}",
        "ID", "NAME", "BIRTH DATE", "CITY", "ADDRESS",
    );
    let _ = writeln!(out, "{}", header.bold());
    for row in rows {
        let _ = writeln!(
            out,
            "  {:>6}  {:<name_width$}  {:<10}  {:<city_width$}  {}",
            row.id,
            row.full_name(),
            roster::text(row.birth_date.as_ref()),
            roster::text(row.city.as_ref()),
            roster::text(row.address.as_ref()),
        );
    }
    out
}

/// Format the dimmed status line shown while a search is active
#[must_use]
pub fn search_status(criteria: &FilterCriteria, local_query: &str) -> String {
    let mut line = format!("search: {}", criteria.summary());
    if !local_query.trim().is_empty() {
        let _ = write!(line, "  filter: {local_query}");
    }
    line.dimmed().to_string()
}

/// Format a full record as sectioned detail lines
#[must_use]
pub fn citizen_details(citizen: &Citizen) -> String {
    let mut out = String::new();

    section(&mut out, "Personal", &[
        ("Full name", citizen.full_name()),
        ("Birth date", roster::text(citizen.birth_date.as_ref())),
        ("Birth place", roster::text(citizen.birth_place.as_ref())),
        ("Gender", roster::text(citizen.gender.as_ref())),
        ("Address", roster::text(citizen.address.as_ref())),
        ("City", roster::text(citizen.city.as_ref())),
        ("Country", roster::text(citizen.country.as_ref())),
        ("Postal code", roster::text(citizen.postal_code.as_ref())),
        ("Phone", roster::text(citizen.phone_number.as_ref())),
        ("Email", roster::text(citizen.email.as_ref())),
        ("Citizenship", roster::text(citizen.citizenship.as_ref())),
        ("Nationality", roster::text(citizen.nationality.as_ref())),
    ]);

    section(&mut out, "Family", &[
        ("Marital status", roster::text(citizen.marital_status.as_ref())),
        ("Children", roster::text(citizen.children_count.as_ref())),
        ("Native language", roster::text(citizen.native_language.as_ref())),
        (
            "Additional languages",
            citizen.additional_languages.as_ref().map_or_else(
                || roster::NO_DATA.to_string(),
                |languages| languages.join(", "),
            ),
        ),
    ]);

    section(&mut out, "Education and career", &[
        ("Education level", roster::text(citizen.education_level.as_ref())),
        ("Institution", roster::text(citizen.institution.as_ref())),
        ("Graduation year", roster::text(citizen.graduation_year.as_ref())),
        ("Specialization", roster::text(citizen.specialization.as_ref())),
        ("Salary", roster::text(citizen.salary.as_ref())),
        ("Work experience", roster::text(citizen.work_experience.as_ref())),
        ("Retirement date", roster::text(citizen.retirement_date.as_ref())),
    ]);

    section(&mut out, "Physical and medical", &[
        ("Height", roster::text(citizen.height.as_ref())),
        ("Weight", roster::text(citizen.weight.as_ref())),
        ("Blood donor", roster::yes_no(citizen.blood_donor)),
        ("Disability", roster::text(citizen.disability.as_ref())),
        ("Wears glasses", roster::yes_no(citizen.wears_glasses)),
        ("Tattoos", roster::yes_no(citizen.tattoos)),
        ("Piercings", roster::yes_no(citizen.piercings)),
        (
            "Last medical exam",
            roster::text(citizen.last_medical_exam_date.as_ref()),
        ),
        (
            "Last fluorography",
            roster::text(citizen.last_fluorography_date.as_ref()),
        ),
    ]);

    section(&mut out, "Documents and status", &[
        (
            "Passport issue date",
            roster::text(citizen.passport_issue_date.as_ref()),
        ),
        ("Foreign passport", roster::yes_no(citizen.foreign_passport)),
        ("Driving license", roster::text(citizen.driving_license.as_ref())),
        ("Military service", roster::text(citizen.military_service.as_ref())),
        ("Criminal record", roster::yes_no(citizen.criminal_record)),
        ("Has car", roster::yes_no(citizen.has_car)),
    ]);

    out
}

fn section(out: &mut String, title: &str, items: &[(&str, String)]) {
    let _ = writeln!(out, "{}", title.bold());
    for (label, value) in items {
        let _ = writeln!(out, "  {label:<22} {value}");
    }
    let _ = writeln!(out);
}

/// Format the statistics report with text bar charts
#[must_use]
pub fn statistics_report(statistics: &Statistics) -> String {
    let mut out = String::new();

    distribution(&mut out, "Gender", &statistics.gender_distribution);
    distribution(&mut out, "Education", &statistics.education_distribution);
    distribution(&mut out, "Citizenship", &statistics.citizenship_distribution);

    let _ = writeln!(out, "{}", "Averages".bold());
    let _ = writeln!(out, "  {:<22} {:.2}", "Salary", statistics.average_salary);
    let _ = writeln!(
        out,
        "  {:<22} {:.2}",
        "Children", statistics.average_children_count
    );
    for (gender, age) in &statistics.average_age_by_gender {
        let _ = writeln!(out, "  {:<22} {age:.1}", format!("Age ({gender})"));
    }

    out
}

fn distribution(out: &mut String, title: &str, counts: &BTreeMap<String, u64>) {
    let _ = writeln!(out, "{}", title.bold());

    let max = counts.values().copied().max().unwrap_or(0);
    let label_width = counts.keys().map(String::len).max().unwrap_or(0);

    for (label, count) in counts {
        let bar_len = if max == 0 {
            0
        } else {
            (*count as usize * BAR_WIDTH).div_ceil(max as usize)
        };
        let bar = "#".repeat(bar_len);
        let _ = writeln!(out, "  {label:<label_width$}  {:>8}  {}", count, bar.cyan());
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SearchField;
    use crate::roster::Citizen;

    #[test]
    fn test_pager_line() {
        assert_eq!(pager_line(1, 10, 57), "1-10 of 57");
        assert_eq!(pager_line(1, 3, 3), "1-3 of 3");
        assert_eq!(pager_line(0, 0, 0), "0 of 0");
        assert_eq!(pager_line(0, 0, 20), "0 of 20");
    }

    #[test]
    fn test_roster_table_renders_missing_fields_as_no_data() {
        colored::control::set_override(false);

        let citizen = Citizen::with_id(7);
        let rows = vec![&citizen];
        let table = roster_table(&rows);

        assert!(table.contains('7'));
        assert!(table.contains(crate::roster::NO_DATA));
    }

    #[test]
    fn test_roster_table_aligns_multibyte_names() {
        colored::control::set_override(false);

        let ivan = Citizen {
            last_name: Some("Иванов".to_string()),
            ..Citizen::with_id(1)
        };
        let lee = Citizen {
            last_name: Some("Lee".to_string()),
            ..Citizen::with_id(2)
        };
        let table = roster_table(&[&ivan, &lee]);

        // The name column is sized in characters: "Иванов" fills it exactly
        let row = table.lines().nth(1).unwrap();
        assert!(row.contains("Иванов  no data"));

        // The birth-date column starts at the same character offset in the
        // header and in every row
        let char_col = |line: &str, needle: &str| {
            let byte = line.find(needle).unwrap();
            line[..byte].chars().count()
        };
        let header_col = char_col(table.lines().next().unwrap(), "BIRTH DATE");
        for line in table.lines().skip(1) {
            assert_eq!(char_col(line, crate::roster::NO_DATA), header_col);
        }
    }

    #[test]
    fn test_roster_table_empty() {
        assert!(roster_table(&[]).contains("no records"));
    }

    #[test]
    fn test_search_status_line() {
        colored::control::set_override(false);

        let mut criteria = FilterCriteria::new();
        criteria.set(SearchField::LastName, "Ivanov");

        assert_eq!(search_status(&criteria, ""), "search: last_name=Ivanov");
        assert_eq!(search_status(&criteria, "  "), "search: last_name=Ivanov");
        assert_eq!(
            search_status(&criteria, "moscow"),
            "search: last_name=Ivanov  filter: moscow"
        );
    }

    #[test]
    fn test_citizen_details_sections() {
        colored::control::set_override(false);

        let citizen = Citizen {
            first_name: Some("Ivan".to_string()),
            last_name: Some("Ivanov".to_string()),
            children_count: Some(2),
            ..Citizen::with_id(1)
        };
        let details = citizen_details(&citizen);

        assert!(details.contains("Personal"));
        assert!(details.contains("Ivanov Ivan"));
        assert!(details.contains("Children"));
        // Absent attributes render uniformly
        assert!(details.contains(crate::roster::NO_DATA));
    }

    #[test]
    fn test_statistics_report_scales_bars() {
        colored::control::set_override(false);

        let statistics = Statistics {
            gender_distribution: [("female".to_string(), 30), ("male".to_string(), 60)]
                .into_iter()
                .collect(),
            education_distribution: BTreeMap::new(),
            citizenship_distribution: BTreeMap::new(),
            average_salary: 52340.5,
            average_children_count: 1.4,
            average_age_by_gender: [("male".to_string(), 41.3)].into_iter().collect(),
        };

        let report = statistics_report(&statistics);
        assert!(report.contains("Gender"));
        assert!(report.contains("52340.50"));
        assert!(report.contains("Age (male)"));

        // The largest bucket gets the full-width bar
        let male_line = report
            .lines()
            .find(|l| l.trim_start().starts_with("male"))
            .unwrap();
        assert!(male_line.contains(&"#".repeat(BAR_WIDTH)));
    }
}

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use empirica_cli::pipeline::{AnalysisReport, ProfileReport};
use empirica_model::{DatasetShapeInfo, MethodRecommendation, VariableInfo};
use empirica_profile::{CorrelationMatrix, StructureDetails};
use empirica_recommend::RobustnessCheck;
use empirica_transform::{AppliedMethod, PreprocessSummary};

pub fn print_profile(report: &ProfileReport, preview: usize) {
    println!("File: {}", report.path.display());
    println!(
        "Rows: {}  Columns: {}",
        report.table.len(),
        report.table.width()
    );
    print_variables(&report.variables);
    print_shape(&report.shape, &report.structure);
    for matrix in &report.correlations {
        print_correlations(matrix);
    }
    println!();
    println!("Preview:");
    println!("{}", report.table.preview(Some(preview)));
}

pub fn print_analysis(report: &AnalysisReport) {
    println!("File: {}", report.profile.path.display());
    print_variables(&report.profile.variables);
    print_shape(&report.shape, &report.profile.structure);
    print_preprocess_summary(&report.preprocessed.summary);
    print_recommendations(&report.recommendations);
    if !report.supplementary.is_empty() {
        println!("Supplementary analyses:");
        print_recommendations(&report.supplementary);
    }
    print_robustness(&report.robustness);
}

fn print_variables(variables: &[VariableInfo]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Type"),
        header_cell("Role"),
        header_cell("Count"),
        header_cell("Missing"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for index in 3..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for variable in variables {
        let role = variable
            .role
            .map_or_else(|| dim_cell("-"), Cell::new);
        let missing = if variable.stats.missing > 0 {
            Cell::new(variable.stats.missing).fg(Color::Yellow)
        } else {
            dim_cell(0)
        };
        let mut row = vec![
            Cell::new(&variable.name).add_attribute(Attribute::Bold),
            Cell::new(variable.kind),
            role,
            Cell::new(variable.stats.count),
            missing,
        ];
        match variable.stats.numeric {
            Some(stats) => row.extend(
                [stats.mean, stats.std, stats.min, stats.max]
                    .into_iter()
                    .map(number_cell),
            ),
            None => row.extend((0..4).map(|_| dim_cell("-"))),
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn print_shape(shape: &DatasetShapeInfo, structure: &StructureDetails) {
    match shape.shape {
        Some(kind) => println!(
            "Data type: {} ({}), confidence {:.2}",
            kind,
            kind.label(),
            shape.confidence
        ),
        None => println!("Data type: unknown"),
    }
    if !structure.time_columns.is_empty() {
        println!("Time columns: {}", structure.time_columns.join(", "));
    }
    if !structure.entity_columns.is_empty() {
        println!("Entity columns: {}", structure.entity_columns.join(", "));
    }
    if let Some(periods) = structure.periods {
        println!("Periods: {periods}");
    }
    if let Some(entities) = structure.entities {
        println!("Entities: {entities}");
    }
    if let Some(frequency) = structure.frequency {
        println!("Frequency: {} ({})", frequency, frequency.label());
    }
}

fn print_correlations(matrix: &CorrelationMatrix) {
    if matrix.columns.len() < 2 {
        return;
    }
    println!("Correlations ({}):", matrix.method);
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(matrix.columns.iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=matrix.columns.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (column, values) in matrix.columns.iter().zip(&matrix.values) {
        let mut row = vec![Cell::new(column).add_attribute(Attribute::Bold)];
        row.extend(values.iter().copied().map(number_cell));
        table.add_row(row);
    }
    println!("{table}");
}

fn print_preprocess_summary(summary: &PreprocessSummary) {
    println!(
        "Rows: {} before, {} after preprocessing",
        summary.rows_before, summary.rows_after
    );
    if summary.records.is_empty() {
        println!("No preprocessing applied.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Column"),
        header_cell("Method"),
        header_cell("Affected"),
        header_cell("Parameters"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for record in &summary.records {
        let method = if record.method == AppliedMethod::Skip {
            Cell::new(record.method).fg(Color::Yellow)
        } else {
            Cell::new(record.method)
        };
        let parameters = record.parameters.map_or_else(|| dim_cell("-"), Cell::new);
        table.add_row(vec![
            Cell::new(record.stage),
            Cell::new(&record.column),
            method,
            Cell::new(record.affected_count),
            parameters,
        ]);
    }
    println!("{table}");
}

pub fn print_recommendations(methods: &[MethodRecommendation]) {
    if methods.is_empty() {
        println!("No methods recommended.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Method"),
        header_cell("Confidence"),
        header_cell("Formula"),
        header_cell("Tests"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for method in methods {
        table.add_row(vec![
            Cell::new(&method.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", method.confidence)),
            Cell::new(&method.formula),
            Cell::new(method.test_methods.join("\n")),
        ]);
    }
    println!("{table}");
}

fn print_robustness(checks: &[RobustnessCheck]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Robustness check"),
        header_cell("Description"),
        header_cell("Parameters"),
    ]);
    apply_table_style(&mut table);
    for check in checks {
        let parameters: Vec<String> = check
            .parameters
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        table.add_row(vec![
            Cell::new(&check.name),
            Cell::new(&check.description),
            Cell::new(parameters.join(", ")),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn number_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.4}"))
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

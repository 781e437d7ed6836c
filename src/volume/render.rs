//! Text views of volume records: the `volume list` table and `volume inspect` detail.

use super::VolumeRecord;
use crate::Result;
use serde::Serialize;

const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

/// Humanize a byte count using truncating division by 1024 at each step.
///
/// The last unit takes whatever magnitude remains.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024 {
            return format!("{} {}", value, unit);
        }
        value /= 1024;
    }
    format!("{} {}", value, UNITS[UNITS.len() - 1])
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// `v4` wins over plain `shared`
pub fn format_shared(record: &VolumeRecord) -> &'static str {
    if record.spec.sharedv4 {
        "v4"
    } else if record.spec.shared {
        "yes"
    } else {
        "no"
    }
}

/// Table columns and their fixed widths; the last column is unbounded
const COLUMNS: &[(&str, usize)] = &[
    ("ID", 23),
    ("NAME", 40),
    ("SIZE", 7),
    ("HA", 3),
    ("SHARED", 7),
    ("ENCRYPTED", 9),
    ("PROXY-VOLUME", 12),
    ("IO_PRIORITY", 11),
];

const STATUS_COLUMN: &str = "STATUS";

fn push_row(out: &mut String, cells: &[String], last: &str) {
    for ((_, width), cell) in COLUMNS.iter().zip(cells) {
        out.push_str(&format!("{:<w$.w$} ", cell, w = *width));
    }
    out.push_str(last);
    out.push('\n');
}

fn list_state(record: &VolumeRecord) -> String {
    match record.attached_node() {
        Some(node) => format!("{} - attached on {}", record.status, node),
        None => format!("{} - detached", record.status),
    }
}

/// Render the `volume list` table: a header then one row per record.
pub fn render_list(records: &[VolumeRecord]) -> String {
    let mut out = String::new();

    let header: Vec<String> = COLUMNS.iter().map(|(label, _)| label.to_string()).collect();
    push_row(&mut out, &header, STATUS_COLUMN);

    for record in records {
        let cells = vec![
            record.id.clone(),
            record.name().to_string(),
            human_size(record.size_bytes()),
            record.spec.ha_level.to_string(),
            format_shared(record).to_string(),
            yes_no(record.spec.encrypted).to_string(),
            yes_no(record.spec.proxy_volume).to_string(),
            record.io_priority().to_uppercase(),
        ];
        push_row(&mut out, &cells, &list_state(record));
    }

    out
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("{:<25}:  {}\n", label, value));
}

/// Render the `volume inspect` detail view for one record.
pub fn render_inspect(record: &VolumeRecord) -> String {
    let mut out = String::new();

    field(&mut out, "Volume", &record.id);
    field(&mut out, "Name", record.name());
    field(&mut out, "Size", human_size(record.size_bytes()));
    field(&mut out, "Format", &record.spec.format);
    field(&mut out, "HA", record.spec.ha_level);
    field(&mut out, "IO Priority", record.io_priority());
    field(&mut out, "Creation time", record.ctime.as_deref().unwrap_or(""));
    field(&mut out, "Shared", format_shared(record));
    field(&mut out, "Status", &record.status);
    let state = match record.attached_node() {
        Some(node) => format!("attached: {}", node),
        None => "detached".to_string(),
    };
    field(&mut out, "State", state);
    field(&mut out, "Last Attached", record.detach_time.as_deref().unwrap_or(""));
    field(&mut out, "Device Path", record.device_path.as_deref().unwrap_or(""));
    field(&mut out, "Bytes used", human_size(record.usage));

    if !record.labels().is_empty() {
        let labels: Vec<String> = record
            .labels()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        field(&mut out, "Labels", labels.join(","));
    }

    let mount_options = record.mount_option_keys();
    if !mount_options.is_empty() {
        field(&mut out, "Mount Options", mount_options.join(","));
    }

    out.push_str("Replica sets on nodes:\n");
    for (index, set) in record.replica_sets.iter().enumerate() {
        out.push_str(&format!("    Set {}\n", index));
        for (node, pool) in set.placements() {
            out.push_str(&format!("      Node           : {}\n", node));
            out.push_str(&format!("       Pool UUID     : {}\n", pool));
        }
    }

    out
}

/// Pretty-print structured output with 2-space indentation.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::fixtures::VOLUMES_JSON;
    use crate::volume::VolumeRegistry;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<VolumeRecord> {
        VolumeRegistry::parse(VOLUMES_JSON)
            .expect("fixture parses")
            .records()
            .to_vec()
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1024), "1 KiB");
        assert_eq!(human_size(1536), "1 KiB");
        assert_eq!(human_size(1048575), "1023 KiB");
        assert_eq!(human_size(1073741824), "1 GiB");
        assert_eq!(human_size(5 * 1024u64.pow(4)), "5 TiB");
        assert_eq!(human_size(2048 * 1024u64.pow(4)), "2048 TiB");
        assert_eq!(human_size(u64::MAX), "16777215 TiB");
    }

    #[test]
    fn test_format_shared_precedence() {
        let mut record = VolumeRecord::default();
        assert_eq!(format_shared(&record), "no");
        record.spec.shared = true;
        assert_eq!(format_shared(&record), "yes");
        record.spec.sharedv4 = true;
        assert_eq!(format_shared(&record), "v4");
        record.spec.shared = false;
        assert_eq!(format_shared(&record), "v4");
    }

    #[test]
    fn test_render_list_table() {
        let table = render_list(&records());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);

        assert!(lines[0].starts_with("ID                      NAME"));
        assert!(lines[0].ends_with("IO_PRIORITY STATUS"));

        let size_col = lines[0].find("SIZE").expect("SIZE header");
        assert_eq!(&lines[1][size_col..size_col + 7], "2 GiB  ");
        assert_eq!(&lines[2][size_col..size_col + 7], "1 KiB  ");

        assert!(lines[1].ends_with("HIGH        up - attached on 10.0.0.11"));
        assert!(lines[2].ends_with("LOW         down - detached"));

        let status_col = lines[0].find(STATUS_COLUMN).expect("STATUS header");
        assert_eq!(&lines[1][status_col..], "up - attached on 10.0.0.11");
        assert_eq!(&lines[2][status_col..], "down - detached");
    }

    #[test]
    fn test_render_list_columns() {
        let table = render_list(&records());
        let row = table.lines().nth(2).expect("second row");
        let fields: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(
            fields,
            vec!["200", "scratch", "1", "KiB", "1", "no", "no", "yes", "LOW", "down", "-", "detached"]
        );
    }

    #[test]
    fn test_render_list_truncates_long_names() {
        let mut record = VolumeRecord::default();
        record.id = "1".to_string();
        record.locator.name = "x".repeat(60);
        record.status = "up".to_string();
        let table = render_list(&[record]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0].len(), lines[1].len() - "up - detached".len() + STATUS_COLUMN.len());
    }

    #[test]
    fn test_render_inspect() {
        let expected = "\
Volume                   :  100
Name                     :  pvc-db
Size                     :  2 GiB
Format                   :  ext4
HA                       :  2
IO Priority              :  high
Creation time            :  2024-03-01T10:00:00Z
Shared                   :  v4
Status                   :  up
State                    :  attached: 10.0.0.11
Last Attached            :\x20\x20
Device Path              :  /dev/pxd/pxd100
Bytes used               :  1 MiB
Labels                   :  app=db,tier=gold
Mount Options            :  noatime,nodiscard
Replica sets on nodes:
    Set 0
      Node           : node-a
       Pool UUID     : pool-a
      Node           : node-b
       Pool UUID     : pool-b
    Set 1
      Node           : node-c
       Pool UUID     : pool-c
";
        assert_eq!(render_inspect(&records()[0]), expected);
    }

    #[test]
    fn test_render_inspect_omits_empty_sections() {
        let text = render_inspect(&records()[1]);
        assert!(!text.contains("Labels"));
        assert!(!text.contains("Mount Options"));
        assert!(text.contains("State                    :  detached\n"));
        assert!(text.contains("Creation time            :  \n"));
        assert!(text.ends_with("Replica sets on nodes:\n    Set 0\n      Node           : node-a\n       Pool UUID     : pool-a\n"));
    }

    #[test]
    fn test_render_json_indentation() -> Result<()> {
        let dataset = VolumeRegistry::parse(VOLUMES_JSON)?;
        let text = render_json(&dataset.select_raw(Some("200")))?;
        assert!(text.starts_with("[\n  {\n    \"id\": \"200\",\n    \"locator\""));
        assert!(text.ends_with("]\n"));
        assert_eq!(VolumeRegistry::parse(&text)?.records(), &dataset.records()[1..]);
        Ok(())
    }
}

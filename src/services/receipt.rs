use crate::models::Booking;

// Palette from the receipt design: #2563eb, #4f46e5, #374151, #f3f4f6.
const TITLE_BLUE: &str = "0.145 0.388 0.922";
const ACCENT_INDIGO: &str = "0.310 0.275 0.898";
const TEXT_GRAY: &str = "0.216 0.255 0.318";
const BOX_GRAY: &str = "0.953 0.957 0.965";

#[derive(Debug)]
pub enum ReceiptError {
    InvalidAmount(f64),
}

impl std::fmt::Display for ReceiptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiptError::InvalidAmount(amount) => {
                write!(f, "cannot render a receipt for amount {amount}")
            }
        }
    }
}

pub fn render_receipt(booking: &Booking) -> Result<Vec<u8>, ReceiptError> {
    if !booking.total_amount.is_finite() || booking.total_amount < 0.0 {
        return Err(ReceiptError::InvalidAmount(booking.total_amount));
    }

    Ok(build_pdf(&content_stream(booking)))
}

// One Letter-sized page of uncompressed text operators. Coordinates are
// PDF user space (origin bottom-left, 612x792).
fn content_stream(booking: &Booking) -> String {
    let date = booking.created_at.format("%B %-d, %Y").to_string();
    let short_id: String = booking.id.chars().take(8).collect();
    let receipt_no = format!("#{short_id}");
    let email = if booking.email.is_empty() {
        "N/A"
    } else {
        booking.email.as_str()
    };
    let sessions = booking.sessions.to_string();
    let plan = booking
        .premium_plan
        .as_ref()
        .map(|p| p.label())
        .unwrap_or("Standard");
    let amount = format!("Rs. {}", format_amount(booking.total_amount));

    let mut ops = String::new();

    ops.push_str(&format!("{TITLE_BLUE} rg\n"));
    push_text(&mut ops, 249, 722, 20, "SessionFlow");
    ops.push_str(&format!("{ACCENT_INDIGO} rg\n"));
    push_text(&mut ops, 262, 707, 12, "Booking Receipt");
    ops.push_str(&format!("{ACCENT_INDIGO} RG\n1 w\n50 672 m\n550 672 l\nS\n"));

    ops.push_str(&format!("{TEXT_GRAY} rg\n"));
    let rows = [
        ("Receipt No:", receipt_no.as_str()),
        ("Date:", date.as_str()),
        ("Customer:", booking.name.as_str()),
        ("Email:", email),
        ("Sessions Booked:", sessions.as_str()),
        ("Plan Type:", plan),
        ("Payment Method:", booking.payment_method.label()),
        ("Amount Paid:", amount.as_str()),
    ];
    let mut y = 632;
    for (label, value) in rows {
        push_text(&mut ops, 100, y, 10, label);
        push_text(&mut ops, 200, y, 10, value);
        y -= 20;
    }

    ops.push_str(&format!(
        "{BOX_GRAY} rg\n{ACCENT_INDIGO} RG\n100 362 400 80 re\nB\n"
    ));
    ops.push_str(&format!("{TEXT_GRAY} rg\n"));
    push_text(&mut ops, 250, 422, 10, "Payment Summary");
    push_text(&mut ops, 150, 392, 10, "Total Amount:");
    push_text(&mut ops, 350, 392, 10, &amount);

    push_text(&mut ops, 222, 312, 10, "Thank you for choosing SessionFlow!");
    push_text(
        &mut ops,
        165,
        292,
        8,
        "This is a computer-generated receipt and does not require a signature.",
    );

    ops
}

fn push_text(ops: &mut String, x: i32, y: i32, size: i32, text: &str) {
    ops.push_str(&format!(
        "BT\n/F1 {size} Tf\n{x} {y} Td\n({}) Tj\nET\n",
        escape_text(text)
    ));
}

// PDF literal strings: backslash-escape delimiters, octal-escape the
// WinAnsi range, drop anything the base font cannot show.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            '\u{80}'..='\u{FF}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

// en-IN digit grouping: the last three digits form a group, the rest pair up.
fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let units = cents / 100;
    let frac = cents % 100;

    let grouped = group_indian(units);
    if frac == 0 {
        grouped
    } else {
        format!("{grouped}.{frac:02}")
    }
}

fn group_indian(n: i64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = vec![tail.to_string()];
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t.to_string());
        rest = h;
    }
    groups.push(rest.to_string());
    groups.reverse();
    groups.join(",")
}

// Minimal PDF 1.4 file: catalog, page tree, one page, Helvetica, and the
// content stream, followed by an xref table with byte-exact offsets.
fn build_pdf(content: &str) -> Vec<u8> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
    ];

    let mut pdf = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }

    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );

    pdf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, PaymentMethod, PremiumPlan};
    use chrono::NaiveDateTime;

    fn make_booking() -> Booking {
        Booking {
            id: "b7e2a1c4-5f3d-4e89-9c21-7a4b8d5e6f10".to_string(),
            user_id: "user-1".to_string(),
            name: "Priya Sharma".to_string(),
            age: 29,
            email: "priya@example.com".to_string(),
            sessions: 5,
            payment_method: PaymentMethod::Card,
            total_amount: 12500.0,
            premium_plan: Some(PremiumPlan::Gold),
            status: BookingStatus::Confirmed,
            created_at: NaiveDateTime::parse_from_str("2025-03-15 14:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            updated_at: NaiveDateTime::parse_from_str("2025-03-15 14:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn test_render_receipt_layout() {
        let bytes = render_receipt(&make_booking()).unwrap();
        let pdf = String::from_utf8(bytes).unwrap();

        assert!(pdf.starts_with("%PDF-1.4"));
        assert!(pdf.contains("(SessionFlow) Tj"));
        assert!(pdf.contains("(Booking Receipt) Tj"));
        assert!(pdf.contains("(#b7e2a1c4) Tj"));
        assert!(pdf.contains("(March 15, 2025) Tj"));
        assert!(pdf.contains("(Priya Sharma) Tj"));
        assert!(pdf.contains("(priya@example.com) Tj"));
        assert!(pdf.contains("(5) Tj"));
        assert!(pdf.contains("(Gold) Tj"));
        assert!(pdf.contains("(Card) Tj"));
        assert!(pdf.contains("(Rs. 12,500) Tj"));
        assert!(pdf.contains("(Payment Summary) Tj"));
        assert!(pdf.contains("(Thank you for choosing SessionFlow!) Tj"));
        assert!(pdf.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_missing_plan_renders_standard() {
        let mut booking = make_booking();
        booking.premium_plan = None;
        let pdf = String::from_utf8(render_receipt(&booking).unwrap()).unwrap();
        assert!(pdf.contains("(Standard) Tj"));
    }

    #[test]
    fn test_empty_email_renders_na() {
        let mut booking = make_booking();
        booking.email = String::new();
        let pdf = String::from_utf8(render_receipt(&booking).unwrap()).unwrap();
        assert!(pdf.contains("(N/A) Tj"));
    }

    #[test]
    fn test_rejects_negative_amount() {
        let mut booking = make_booking();
        booking.total_amount = -10.0;
        let err = render_receipt(&booking).unwrap_err();
        assert!(matches!(err, ReceiptError::InvalidAmount(_)));
    }

    #[test]
    fn test_rejects_non_finite_amount() {
        let mut booking = make_booking();
        booking.total_amount = f64::NAN;
        let err = render_receipt(&booking).unwrap_err();
        assert!(matches!(err, ReceiptError::InvalidAmount(_)));
    }

    #[test]
    fn test_format_amount_indian_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(15000.0), "15,000");
        assert_eq!(format_amount(150000.0), "1,50,000");
        assert_eq!(format_amount(12345678.0), "1,23,45,678");
        assert_eq!(format_amount(1234.5), "1,234.50");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape_text("café"), "caf\\351");
        assert_eq!(escape_text("emoji \u{1F600}"), "emoji ?");
    }

    #[test]
    fn test_xref_offsets_are_byte_accurate() {
        let bytes = render_receipt(&make_booking()).unwrap();
        let pdf = String::from_utf8(bytes).unwrap();

        let startxref = pdf.rfind("startxref\n").unwrap();
        let xref_offset: usize = pdf[startxref + "startxref\n".len()..]
            .lines()
            .next()
            .unwrap()
            .trim()
            .parse()
            .unwrap();
        assert_eq!(&pdf[xref_offset..xref_offset + 4], "xref");

        let first_entry = pdf[xref_offset..].lines().nth(3).unwrap();
        let first_offset: usize = first_entry[..10].parse().unwrap();
        assert!(pdf[first_offset..].starts_with("1 0 obj"));
    }
}

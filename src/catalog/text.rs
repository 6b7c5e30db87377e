// Reparación de texto árabe leído como Windows-1252 ("Ù†Ø¸Ø±ÙŠ" -> "نظري").
//
// El scraper a veces entrega UTF-8 reinterpretado como cp1252. Revertimos la
// transformación: cada carácter vuelve a su byte cp1252 y el resultado se
// decodifica como UTF-8. Los tramos que no se pueden revertir se dejan tal cual.

/// Caracteres de cp1252 en 0x80..=0x9F (los huecos no tienen carácter).
const CP1252_HIGH: [Option<char>; 32] = [
    Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
    Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
    None, Some('‘'), Some('’'), Some('“'), Some('”'), Some('•'), Some('–'), Some('—'),
    Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
];

fn cp1252_byte(c: char) -> Option<u8> {
    let code = c as u32;
    if code < 0x80 || (0xA0..=0xFF).contains(&code) {
        return Some(code as u8);
    }
    // 0x81, 0x8D, 0x8F, 0x90, 0x9D no tienen carácter en cp1252; los
    // navegadores los dejan pasar como controles C1
    if matches!(code, 0x81 | 0x8D | 0x8F | 0x90 | 0x9D) {
        return Some(code as u8);
    }
    CP1252_HIGH
        .iter()
        .position(|&mapped| mapped == Some(c))
        .map(|i| 0x80 + i as u8)
}

/// Marcas típicas del árabe mal decodificado (bytes guía 0xD8/0xD9).
pub fn looks_garbled(s: &str) -> bool {
    s.contains('Ø') || s.contains('Ù')
}

/// Devuelve `Some(reparado)` cuando hubo algo que reparar.
pub fn repair_mojibake(s: &str) -> Option<String> {
    if !looks_garbled(s) {
        return None;
    }

    let mut out = String::with_capacity(s.len());
    let mut run: Vec<u8> = Vec::new();
    let mut run_chars: Vec<char> = Vec::new();
    let mut changed = false;

    for c in s.chars() {
        match cp1252_byte(c) {
            Some(b) => {
                run.push(b);
                run_chars.push(c);
            }
            None => {
                changed |= flush_run(&mut out, &mut run, &mut run_chars);
                out.push(c);
            }
        }
    }
    changed |= flush_run(&mut out, &mut run, &mut run_chars);

    (changed && out != s).then_some(out)
}

/// Decodifica el prefijo UTF-8 válido del tramo; el resto se copia sin tocar.
fn flush_run(out: &mut String, run: &mut Vec<u8>, chars: &mut Vec<char>) -> bool {
    if run.is_empty() {
        return false;
    }
    let mut changed = false;
    let mut start = 0;
    while start < run.len() {
        match std::str::from_utf8(&run[start..]) {
            Ok(valid) => {
                changed |= valid.chars().count() != chars.len() - start;
                out.push_str(valid);
                break;
            }
            Err(e) => {
                let valid_len = e.valid_up_to();
                if valid_len > 0 {
                    // prefijo válido: decodificado
                    let valid = std::str::from_utf8(&run[start..start + valid_len]).unwrap_or_default();
                    changed |= valid.chars().count() != valid_len;
                    out.push_str(valid);
                    start += valid_len;
                } else {
                    // byte inválido: se copia el carácter original
                    out.push(chars[start]);
                    start += 1;
                }
            }
        }
    }
    run.clear();
    chars.clear();
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_known_labels() {
        assert_eq!(repair_mojibake("Ù†Ø¸Ø±ÙŠ").as_deref(), Some("نظري"));
        assert_eq!(repair_mojibake("Ø¹Ù…Ù„ÙŠ").as_deref(), Some("عملي"));
        assert_eq!(repair_mojibake("Ø§Ù„Ø£Ø­Ø¯").as_deref(), Some("الأحد"));
    }

    #[test]
    fn leaves_clean_text_alone() {
        assert_eq!(repair_mojibake("نظري"), None);
        assert_eq!(repair_mojibake("Data Structures"), None);
        assert_eq!(repair_mojibake("Ørsted"), None);
    }
}

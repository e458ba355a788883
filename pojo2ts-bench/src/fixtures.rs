//! Synthetic class model documents.

use std::fmt::Write;

/// Builds a model where `Node0` references `Node1` and so on, `depth` classes
/// deep. Every class carries `width` scalar fields plus a list of its own type.
#[must_use]
pub fn chain_model_xml(depth: usize, width: usize) -> String {
    let mut xml = String::from("<model>\n");

    for level in 0..depth {
        let _ = writeln!(xml, "  <class name=\"bench.Node{level}\">");
        for field in 0..width {
            let ty = match field % 4 {
                0 => "int",
                1 => "String",
                2 => "java.math.BigDecimal",
                _ => "java.util.List&lt;Long&gt;",
            };
            let _ = writeln!(xml, "    <field name=\"f{field}\" type=\"{ty}\"/>");
        }
        let _ = writeln!(
            xml,
            "    <field name=\"siblings\" type=\"java.util.List&lt;bench.Node{level}&gt;\"/>"
        );
        if level + 1 < depth {
            let _ = writeln!(
                xml,
                "    <field name=\"next\" type=\"bench.Node{}\"/>",
                level + 1
            );
        }
        xml.push_str("  </class>\n");
    }

    xml.push_str("</model>\n");
    xml
}

/// Builds a model with one root class referencing `count` leaf classes that
/// each carry a remark-annotated field.
#[must_use]
pub fn fan_out_model_xml(count: usize) -> String {
    let mut xml = String::from("<model>\n  <class name=\"bench.Root\">\n");
    for i in 0..count {
        let _ = writeln!(xml, "    <field name=\"leaf{i}\" type=\"bench.Leaf{i}\"/>");
    }
    xml.push_str("  </class>\n");

    for i in 0..count {
        let _ = writeln!(xml, "  <class name=\"bench.Leaf{i}\">");
        xml.push_str("    <field name=\"value\" type=\"double\">\n");
        xml.push_str("      <annotation name=\"io.swagger.annotations.ApiModelProperty\">\n");
        let _ = writeln!(xml, "        <attribute name=\"value\">\"leaf {i}\"</attribute>");
        xml.push_str("      </annotation>\n    </field>\n  </class>\n");
    }

    xml.push_str("</model>\n");
    xml
}

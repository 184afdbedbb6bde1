//! Tests for rn-export.
//!
//! Structural assertions parse the written XML back with `roxmltree`; the
//! format contract itself is pinned with literal expected bytes.

#[cfg(test)]
mod helpers {
    use rn_core::{CenterLine, LaneAttributes, LaneEdge, LaneNetwork, Point, SectionId};

    pub fn edge(section: u32, kind: &str, index: i32, points: &[(f64, f64)]) -> LaneEdge {
        LaneEdge::new(SectionId(section), kind, index, points.iter().copied().map(Point::from))
    }

    pub fn line(section: u32, kind: &str, index: i32, points: &[(f64, f64)]) -> CenterLine {
        CenterLine::new(
            SectionId(section),
            kind,
            index,
            points.iter().copied().map(Point::from),
            LaneAttributes::default(),
        )
    }

    /// Two sections, inserted out of order, with unsorted edges and lines.
    pub fn mixed_network() -> LaneNetwork {
        LaneNetwork::new(
            vec![
                edge(7, "solid", 1, &[(0.0, 0.0), (5.0, 0.0)]),
                edge(2, "solid", 0, &[(0.0, 0.0)]),
                edge(7, "dashed", 3, &[(0.0, 1.0)]),
                edge(7, "solid", 0, &[(0.0, 2.0)]),
                edge(2, "curb", 9, &[(0.0, 3.0)]),
            ],
            vec![
                line(7, "bus", 2, &[(1.0, 1.0)]),
                line(7, "lane", 0, &[(2.0, 2.0)]),
                line(9, "lane", 1, &[(3.0, 3.0)]),
                line(7, "acceleration", 1, &[(4.0, 4.0)]),
            ],
        )
    }

    pub fn to_xml(net: &LaneNetwork, name: &str) -> String {
        let mut buf = Vec::new();
        crate::write_network(net, name, &mut buf, &crate::ExportConfig::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    /// Child elements of `node` named `name`.
    pub fn children<'a, 'input>(
        node: roxmltree::Node<'a, 'input>,
        name: &str,
    ) -> Vec<roxmltree::Node<'a, 'input>> {
        node.children()
            .filter(|n| n.is_element() && n.tag_name().name() == name)
            .collect()
    }

    /// The single child element named `name`.
    pub fn child<'a, 'input>(node: roxmltree::Node<'a, 'input>, name: &str) -> roxmltree::Node<'a, 'input> {
        let found = children(node, name);
        assert_eq!(found.len(), 1, "expected one <{name}> under <{}>", node.tag_name().name());
        found[0]
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregate {
    use rn_core::SectionId;

    use super::helpers::{edge, line, mixed_network};
    use crate::{aggregate, aggregate_model};

    #[test]
    fn empty_input_gives_no_sections() {
        assert!(aggregate(&[], &[]).is_empty());
    }

    #[test]
    fn every_item_in_its_own_section_exactly_once() {
        let net = mixed_network();
        let sections = aggregate_model(&net);

        let ids: Vec<_> = sections.keys().copied().collect();
        assert_eq!(ids, [SectionId(2), SectionId(7), SectionId(9)]);

        let edge_total: usize = sections.values().map(|s| s.lane_edges.len()).sum();
        let line_total: usize = sections.values().map(|s| s.center_lines.len()).sum();
        assert_eq!(edge_total, net.lane_edges.len());
        assert_eq!(line_total, net.center_lines.len());

        for (id, section) in &sections {
            assert_eq!(section.id, *id);
            assert!(section.lane_edges.iter().all(|e| e.section_id == *id));
            assert!(section.center_lines.iter().all(|c| c.section_id == *id));
        }
    }

    #[test]
    fn edges_sorted_by_type_then_index() {
        let net = mixed_network();
        let sections = aggregate_model(&net);
        let keys: Vec<_> = sections[&SectionId(7)].lane_edges.iter().map(|e| e.sort_key()).collect();
        assert_eq!(keys, [("dashed", 3), ("solid", 0), ("solid", 1)]);
    }

    #[test]
    fn center_lines_sorted_by_index_only() {
        let net = mixed_network();
        let sections = aggregate_model(&net);
        let lines: Vec<_> = sections[&SectionId(7)]
            .center_lines
            .iter()
            .map(|c| (c.index, c.kind.as_str()))
            .collect();
        // "acceleration" < "bus" < "lane" would give a different order if
        // type took part in the sort.
        assert_eq!(lines, [(0, "lane"), (1, "acceleration"), (2, "bus")]);
    }

    #[test]
    fn one_sided_sections_are_kept() {
        let net = mixed_network();
        let sections = aggregate_model(&net);
        assert!(sections[&SectionId(2)].center_lines.is_empty());
        assert_eq!(sections[&SectionId(2)].lane_edges.len(), 2);
        assert!(sections[&SectionId(9)].lane_edges.is_empty());
        assert_eq!(sections[&SectionId(9)].center_lines.len(), 1);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let edges = vec![
            edge(1, "solid", 0, &[(1.0, 0.0)]),
            edge(1, "solid", 0, &[(2.0, 0.0)]),
            edge(1, "solid", 0, &[(3.0, 0.0)]),
        ];
        let lines = vec![line(1, "b", 4, &[(1.0, 0.0)]), line(1, "a", 4, &[(2.0, 0.0)])];
        let sections = aggregate(&edges, &lines);

        let xs: Vec<f64> = sections[&SectionId(1)].lane_edges.iter().map(|e| e.polyline[0].x).collect();
        assert_eq!(xs, [1.0, 2.0, 3.0]);
        let kinds: Vec<&str> = sections[&SectionId(1)].center_lines.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, ["b", "a"]);
    }

    #[test]
    fn invalid_section_is_its_own_group() {
        let mut orphan = edge(0, "solid", 0, &[]);
        orphan.section_id = SectionId::INVALID;
        let edges = vec![edge(3, "solid", 0, &[]), orphan];
        let sections = aggregate(&edges, &[]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.keys().last(), Some(&SectionId::INVALID));
    }
}

// ── Rounding ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rounding {
    use crate::round_coordinate;

    #[test]
    fn half_away_from_zero() {
        assert_eq!(round_coordinate(10.5), Some(11));
        assert_eq!(round_coordinate(-10.5), Some(-11));
        assert_eq!(round_coordinate(0.5), Some(1));
        assert_eq!(round_coordinate(-0.5), Some(-1));
        assert_eq!(round_coordinate(2.5), Some(3));
    }

    #[test]
    fn nearest_integer() {
        assert_eq!(round_coordinate(10.4), Some(10));
        assert_eq!(round_coordinate(10.6), Some(11));
        assert_eq!(round_coordinate(-0.4), Some(0));
        assert_eq!(round_coordinate(123_456.0), Some(123_456));
    }

    #[test]
    fn unroundable_values() {
        assert_eq!(round_coordinate(f64::NAN), None);
        assert_eq!(round_coordinate(f64::INFINITY), None);
        assert_eq!(round_coordinate(f64::NEG_INFINITY), None);
        assert_eq!(round_coordinate(1e300), None);
        assert_eq!(round_coordinate(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(round_coordinate(9_223_372_036_854_775_808.0), None);
    }
}

// ── Document serialization ────────────────────────────────────────────────────

#[cfg(test)]
mod document {
    use crate::{Document, Element, ExportConfig, Node};

    #[test]
    fn attributes_written_in_key_order() {
        let doc = Document::new(
            Element::new("point").with_attr("y", "2").with_attr("x", "1").with_attr("index", "0"),
        );
        assert_eq!(
            doc.to_xml_string(&ExportConfig::default()).unwrap(),
            "<point index=\"0\" x=\"1\" y=\"2\" />\n"
        );
    }

    #[test]
    fn nesting_indents_by_depth() {
        let root = Element::new("a")
            .with_child(Element::new("b").with_child(Element::new("c")))
            .with_child(Element::new("d"));
        let doc = Document::new(root);

        assert_eq!(
            doc.to_xml_string(&ExportConfig::default()).unwrap(),
            "<a>\n <b>\n  <c />\n </b>\n <d />\n</a>\n"
        );

        let wide = ExportConfig { indent_width: 4, xml_declaration: true };
        assert_eq!(
            doc.to_xml_string(&wide).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a>\n    <b>\n        <c />\n    </b>\n    <d />\n</a>\n"
        );
    }

    #[test]
    fn attribute_values_escaped() {
        let doc = Document::new(Element::new("n").with_attr("name", "a&b <\"c\">\nd"));
        let xml = doc.to_xml_string(&ExportConfig::default()).unwrap();
        assert_eq!(xml, "<n name=\"a&amp;b &lt;&quot;c&quot;&gt;&#10;d\" />\n");

        let parsed = roxmltree::Document::parse(&xml).unwrap();
        assert_eq!(parsed.root_element().attribute("name"), Some("a&b <\"c\">\nd"));
    }

    #[test]
    fn set_attr_replaces() {
        let mut e = Element::new("x").with_attr("k", "1");
        e.set_attr("k", "2");
        assert_eq!(e.attributes.get("k").map(String::as_str), Some("2"));
        assert_eq!(e.attributes.len(), 1);
    }

    #[test]
    fn comments_and_elements_keep_push_order() {
        let mut e = Element::new("root");
        e.push_comment("note");
        e.push(Element::new("child"));
        assert_eq!(e.children, [Node::Comment("note".into()), Node::Element(Element::new("child"))]);
        assert!(!e.is_leaf());
        assert_eq!(
            Document::new(e).to_xml_string(&ExportConfig::default()).unwrap(),
            "<root>\n <!--note-->\n <child />\n</root>\n"
        );
    }

    #[test]
    fn only_markup_and_newline_are_escaped() {
        let doc = Document::new(Element::new("n").with_attr("v", "a\tb\rc"));
        assert_eq!(
            doc.to_xml_string(&ExportConfig::default()).unwrap(),
            "<n v=\"a\tb\rc\" />\n"
        );
    }
}

// ── Built documents ───────────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use rn_core::{CenterLine, LaneAttributes, LaneNetwork, Point, SectionId};

    use super::helpers::{child, children, edge, line, mixed_network, to_xml};
    use crate::{aggregate_model, build_document, ExportError, GENERATED_NOTICE};

    #[test]
    fn single_edge_scenario_bytes() {
        let net = LaneNetwork::new(vec![edge(1, "solid", 0, &[(0.0, 0.0), (10.0, 0.0)])], vec![]);
        let expected = "\
<road-network name=\"demo\">
 <!--This file was generated by rn-export.  Do not edit.-->
 <section section-id=\"1\">
  <lane-edges>
   <lane-edge index=\"0\" type=\"solid\">
    <polyline>
     <point index=\"0\" x=\"0\" y=\"0\" />
     <point index=\"1\" x=\"10\" y=\"0\" />
    </polyline>
   </lane-edge>
  </lane-edges>
  <center-lines />
 </section>
</road-network>
";
        assert_eq!(to_xml(&net, "demo"), expected);
    }

    #[test]
    fn empty_network_has_root_and_notice_only() {
        let xml = to_xml(&LaneNetwork::empty(), "nothing");
        assert_eq!(
            xml,
            format!("<road-network name=\"nothing\">\n <!--{GENERATED_NOTICE}-->\n</road-network>\n")
        );
    }

    #[test]
    fn root_name_and_leading_comment() {
        let xml = to_xml(&mixed_network(), "city & port");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "road-network");
        assert_eq!(root.attribute("name"), Some("city & port"));

        let first = root.children().find(|n| !n.is_text()).unwrap();
        assert!(first.is_comment());
        assert_eq!(first.text(), Some(GENERATED_NOTICE));
    }

    #[test]
    fn sections_in_ascending_id_order() {
        let xml = to_xml(&mixed_network(), "n");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let ids: Vec<_> = children(doc.root_element(), "section")
            .iter()
            .map(|s| s.attribute("section-id").unwrap())
            .collect();
        assert_eq!(ids, ["2", "7", "9"]);
    }

    #[test]
    fn dashed_before_solid() {
        let net = LaneNetwork::new(
            vec![edge(1, "solid", 0, &[(0.0, 0.0)]), edge(1, "dashed", 0, &[(0.0, 1.0)])],
            vec![],
        );
        let xml = to_xml(&net, "n");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let section = child(doc.root_element(), "section");
        let types: Vec<_> = children(child(section, "lane-edges"), "lane-edge")
            .iter()
            .map(|e| e.attribute("type").unwrap())
            .collect();
        assert_eq!(types, ["dashed", "solid"]);
    }

    #[test]
    fn center_line_only_section_has_empty_edges() {
        let net = LaneNetwork::new(vec![], vec![line(4, "lane", 0, &[(1.0, 1.0)])]);
        let xml = to_xml(&net, "n");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let section = child(doc.root_element(), "section");
        assert_eq!(section.attribute("section-id"), Some("4"));
        assert_eq!(child(section, "lane-edges").children().filter(|n| n.is_element()).count(), 0);
        assert_eq!(children(child(section, "center-lines"), "center-line").len(), 1);
    }

    #[test]
    fn single_true_flag_round_trips() {
        let attrs = LaneAttributes { can_turn_left: true, ..Default::default() };
        let net = LaneNetwork::new(
            vec![],
            vec![CenterLine::new(SectionId(1), "lane", 0, [Point::new(0.0, 0.0)], attrs)],
        );
        let xml = to_xml(&net, "n");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let section = child(doc.root_element(), "section");
        let center_line = child(child(section, "center-lines"), "center-line");
        let lane_attrs = child(center_line, "lane-attributes");

        assert_eq!(lane_attrs.attributes().len(), 16);
        for key in LaneAttributes::KEYS {
            let expected = if key == "can-turn-left" { "true" } else { "false" };
            assert_eq!(lane_attrs.attribute(key), Some(expected), "{key}");
        }
    }

    #[test]
    fn lane_attributes_precede_polyline() {
        let net = LaneNetwork::new(vec![], vec![line(1, "lane", 0, &[(0.0, 0.0)])]);
        let xml = to_xml(&net, "n");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let center_line = doc.descendants().find(|n| n.has_tag_name("center-line")).unwrap();
        let names: Vec<_> = center_line
            .children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(names, ["lane-attributes", "polyline"]);
    }

    #[test]
    fn points_rounded_and_indexed() {
        let net = LaneNetwork::new(
            vec![edge(1, "solid", 0, &[(10.5, -10.5), (10.4, 10.6), (-0.5, 2.49)])],
            vec![],
        );
        let xml = to_xml(&net, "n");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let points: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("point"))
            .map(|p| {
                (
                    p.attribute("index").unwrap(),
                    p.attribute("x").unwrap(),
                    p.attribute("y").unwrap(),
                )
            })
            .collect();
        assert_eq!(points, [("0", "11", "-11"), ("1", "10", "11"), ("2", "-1", "2")]);
    }

    #[test]
    fn center_line_polyline_is_its_own() {
        let net = LaneNetwork::new(
            vec![edge(1, "solid", 0, &[(100.0, 100.0)])],
            vec![line(1, "lane", 0, &[(3.0, 4.0), (5.0, 6.0)])],
        );
        let xml = to_xml(&net, "n");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let center_line = doc.descendants().find(|n| n.has_tag_name("center-line")).unwrap();
        let xs: Vec<_> = children(child(center_line, "polyline"), "point")
            .iter()
            .map(|p| p.attribute("x").unwrap())
            .collect();
        assert_eq!(xs, ["3", "5"]);
    }

    #[test]
    fn model_is_not_rounded() {
        let net = LaneNetwork::new(vec![edge(1, "solid", 0, &[(1.4, 2.6)])], vec![]);
        let _ = to_xml(&net, "n");
        assert_eq!(net.lane_edges[0].polyline[0], Point::new(1.4, 2.6));
    }

    #[test]
    fn non_finite_point_names_its_owner() {
        let net = LaneNetwork::new(
            vec![],
            vec![line(5, "bus", 2, &[(0.0, 0.0), (f64::NAN, 1.0)])],
        );
        let sections = aggregate_model(&net);
        match build_document(&sections, "n") {
            Err(ExportError::Coordinate { section, entity, kind, index, position, .. }) => {
                assert_eq!(section, SectionId(5));
                assert_eq!(entity, "center-line");
                assert_eq!(kind, "bus");
                assert_eq!(index, 2);
                assert_eq!(position, 1);
            }
            other => panic!("expected Coordinate error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_section_id_written_as_number() {
        let mut orphan = edge(0, "solid", 0, &[]);
        orphan.section_id = SectionId::INVALID;
        let xml = to_xml(&LaneNetwork::new(vec![orphan], vec![]), "n");
        assert!(xml.contains("<section section-id=\"4294967295\">"), "{xml}");
        assert!(xml.contains("<polyline />"), "{xml}");
    }
}

// ── File export ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod writer {
    use rn_core::LaneNetwork;
    use tempfile::TempDir;

    use super::helpers::{edge, line, mixed_network};
    use crate::{export_network, export_network_with, write_network, ExportConfig, ExportError};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn dir_entries(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn export_creates_file() {
        let dir = tmp();
        let path = dir.path().join("network.xml");
        export_network(&mixed_network(), "mixed", &path).unwrap();

        let xml = std::fs::read_to_string(&path).unwrap();
        assert!(xml.starts_with("<road-network name=\"mixed\">\n"));
        assert!(xml.ends_with("</road-network>\n"));
        assert_eq!(dir_entries(&dir), ["network.xml"]);
    }

    #[test]
    fn repeated_export_is_byte_identical() {
        let dir = tmp();
        let a = dir.path().join("a.xml");
        let b = dir.path().join("b.xml");
        export_network(&mixed_network(), "n", &a).unwrap();
        export_network(&mixed_network(), "n", &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn export_replaces_existing_file() {
        let dir = tmp();
        let path = dir.path().join("network.xml");
        std::fs::write(&path, "old contents").unwrap();
        export_network(&mixed_network(), "n", &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("<road-network"));
    }

    #[test]
    fn write_network_reports_byte_count() {
        let mut buf = Vec::new();
        let n = write_network(&mixed_network(), "n", &mut buf, &ExportConfig::default()).unwrap();
        assert_eq!(n as usize, buf.len());
    }

    #[test]
    fn config_reaches_the_file() {
        let dir = tmp();
        let path = dir.path().join("network.xml");
        let config = ExportConfig { indent_width: 2, xml_declaration: true };
        let net = LaneNetwork::new(vec![edge(1, "solid", 0, &[])], vec![]);
        export_network_with(&net, "n", &path, &config).unwrap();

        let xml = std::fs::read_to_string(&path).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<road-network"));
        assert!(xml.contains("\n  <section section-id=\"1\">\n    <lane-edges>"), "{xml}");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tmp();
        let path = dir.path().join("no-such-dir").join("network.xml");
        let err = export_network(&mixed_network(), "n", &path).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)), "got {err:?}");
        assert!(!path.exists());
    }

    #[cfg(unix)]
    fn mode(path: &std::path::Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn new_file_gets_plain_file_mode() {
        let dir = tmp();
        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, "x").unwrap();

        let path = dir.path().join("network.xml");
        export_network(&mixed_network(), "n", &path).unwrap();
        assert_eq!(mode(&path), mode(&plain), "exported {:o} plain {:o}", mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn replaced_file_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tmp();
        let path = dir.path().join("network.xml");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        export_network(&mixed_network(), "n", &path).unwrap();
        assert_eq!(mode(&path), 0o640);
    }

    #[test]
    fn failed_export_keeps_previous_file() {
        let dir = tmp();
        let path = dir.path().join("network.xml");
        export_network(&mixed_network(), "good", &path).unwrap();
        let before = std::fs::read(&path).unwrap();

        let bad = LaneNetwork::new(vec![], vec![line(1, "lane", 0, &[(f64::INFINITY, 0.0)])]);
        let err = export_network(&bad, "bad", &path).unwrap_err();
        assert!(matches!(err, ExportError::Coordinate { .. }));

        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(dir_entries(&dir), ["network.xml"], "temporary file left behind");
    }
}

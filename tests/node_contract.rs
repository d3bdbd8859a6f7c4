use trigger_dsp::{
    dsp::{SeedPolicy, Time, Trigger},
    graph::{
        registry, vertex::names, AnyOperator, AudioBuffer, BuildParams, DataRef, DataType,
        NodeKind, Operator, OperatorSettings, PortBinder, PortData, VertexBindings,
    },
    BuildError, RegistryError,
};

/// Build `kind` with `inputs` and return it with its single output reference.
fn build(
    kind: NodeKind,
    settings: OperatorSettings,
    inputs: &VertexBindings,
    data: &mut PortData,
) -> (AnyOperator, VertexBindings) {
    let params = BuildParams::new(settings, inputs).unwrap();
    let op = kind.create(&params, data).unwrap();
    let mut outputs = VertexBindings::new();
    op.bind_outputs(&mut outputs);
    (op, outputs)
}

fn audio_out(outputs: &VertexBindings) -> DataRef<AudioBuffer> {
    outputs.get_typed::<AudioBuffer>(names::OUT).unwrap()
}

#[test]
fn click_rzero_wrap_chain() {
    let settings = OperatorSettings::new(48_000.0, 8).unwrap();
    let mut data = PortData::new();
    let clock = data.trigger(8);

    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, clock);
    let (mut click, click_out) = build(NodeKind::Click, settings, &inputs, &mut data);

    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, audio_out(&click_out));
    inputs.bind(names::A, data.float(-1.0));
    let (mut rzero, rzero_out) = build(NodeKind::RZero, settings, &inputs, &mut data);

    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, audio_out(&rzero_out));
    let (mut wrap, wrap_out) = build(NodeKind::Wrap, settings, &inputs, &mut data);

    let mut chain = [&mut click, &mut rzero, &mut wrap];
    let mut run = |data: &mut PortData| {
        for op in chain.iter_mut() {
            op.execute(data);
        }
        data.get(audio_out(&wrap_out)).unwrap().to_vec()
    };

    data.get_mut(clock).unwrap().fire(6).unwrap();
    let first = run(&mut data);
    // click at 6, y[7] = 0 + 1 * 1 = 1.0 wraps to -1.0
    assert_eq!(first, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, -1.0]);

    data.advance_triggers();
    let second = run(&mut data);
    assert_eq!(second, vec![0.0; 8], "prior sample carried as 0.0");
}

#[test]
fn timer_cadence_over_many_blocks() {
    let settings = OperatorSettings::default();
    let mut data = PortData::new();
    let clock = data.trigger(settings.block_size);
    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, clock);
    let (mut timer, outputs) = build(NodeKind::Timer, settings, &inputs, &mut data);
    let time = outputs.get_typed::<Time>(names::OUT).unwrap();

    let mut emitted = Vec::new();
    for _ in 0..10 {
        data.advance_triggers();
        data.get_mut(clock).unwrap().fire(0).unwrap();
        timer.execute(&mut data);
        emitted.push(data.read(time).unwrap());
    }

    let mut instant = 0.0;
    for (i, interval) in emitted.iter().enumerate() {
        let expected_interval = if i == 0 { 0.0 } else { 0.01 };
        assert!(
            (interval.seconds() - expected_interval).abs() < 1e-6,
            "block {}: interval {}",
            i,
            interval.seconds()
        );

        instant += interval.seconds();
        let expected_instant = i as f64 * 0.01;
        assert!(
            (instant - expected_instant).abs() < 1e-5,
            "block {}: instant {} expected {}",
            i,
            instant,
            expected_instant
        );
    }
}

#[test]
fn multiple_triggers_are_detected_not_corrected() {
    let settings = OperatorSettings::new(1_000.0, 100).unwrap();
    let mut data = PortData::new();
    let clock = data.trigger(100);
    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, clock);

    let (mut click, click_out) = build(NodeKind::Click, settings, &inputs, &mut data);
    let (mut timer, _) = build(NodeKind::Timer, settings, &inputs, &mut data);

    for offset in [10, 40, 70] {
        data.get_mut(clock).unwrap().fire(offset).unwrap();
    }
    click.execute(&mut data);
    timer.execute(&mut data);

    let out = data.get(audio_out(&click_out)).unwrap();
    assert_eq!(out.iter().filter(|&&s| s == 1.0).count(), 3);
    assert_eq!(click.overlapping_blocks(), Some(1));
    assert_eq!(timer.overlapping_blocks(), Some(1));

    data.advance_triggers();
    data.get_mut(clock).unwrap().fire(0).unwrap();
    click.execute(&mut data);
    assert_eq!(click.overlapping_blocks(), Some(1), "single trigger block not counted");
}

#[test]
fn propagate_seed_reaches_output_once() {
    let settings = OperatorSettings::new(48_000.0, 4).unwrap();
    let mut data = PortData::new();
    let input = data.insert(AudioBuffer::from_slice(&[0.5; 4]));
    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, input);

    let params = BuildParams::new(settings, &inputs)
        .unwrap()
        .with_seed(SeedPolicy::Propagate);
    let mut rzero = NodeKind::RZero.create(&params, &mut data).unwrap();
    let mut outputs = VertexBindings::new();
    rzero.bind_outputs(&mut outputs);
    let out = audio_out(&outputs);

    rzero.execute(&mut data);
    assert!(data.get(out).unwrap()[0].is_nan());

    rzero.execute(&mut data);
    assert!(data.get(out).unwrap().iter().all(|s| s.is_finite()));
}

#[test]
fn build_errors_surface_before_execution() {
    let settings = OperatorSettings::new(48_000.0, 64).unwrap();
    let mut data = PortData::new();

    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, data.audio(32));
    let params = BuildParams::new(settings, &inputs).unwrap();
    assert_eq!(
        NodeKind::Reflect.create(&params, &mut data).unwrap_err(),
        BuildError::BlockSizeMismatch {
            port: names::IN,
            expected: 64,
            found: 32
        }
    );

    let gone = data.trigger(64);
    data.remove(gone);
    let mut inputs = VertexBindings::new();
    inputs.bind(names::IN, gone);
    let params = BuildParams::new(settings, &inputs).unwrap();
    assert_eq!(
        NodeKind::Click.create(&params, &mut data).unwrap_err(),
        BuildError::DanglingReference { port: names::IN }
    );

    let bad = OperatorSettings {
        sample_rate: 0.0,
        block_size: 64,
    };
    let empty = VertexBindings::new();
    assert!(matches!(
        BuildParams::new(bad, &empty),
        Err(BuildError::Settings(_))
    ));
}

#[test]
fn registry_catalog() {
    let registry = registry::init();
    assert_eq!(registry.len(), 5);
    assert!(registry::get().is_ok());

    let class_names: Vec<String> = registry
        .iter()
        .map(|(_, class)| class.class_name.to_string())
        .collect();
    assert_eq!(
        class_names,
        vec![
            "UE.Click",
            "UE.Timer",
            "UE.RZero (Audio).Audio",
            "UE.Reflect (Audio).Audio",
            "UE.Wrap (Audio).Audio",
        ]
    );

    let rzero = registry.lookup("UE.RZero (Audio).Audio").unwrap();
    let class = registry.descriptor(rzero);
    assert_eq!(class.author, "geekrelief");
    let a = class.interface.input(names::A).unwrap();
    assert_eq!(a.data_type, DataType::Float);

    assert_eq!(
        registry.lookup("UE.Click.Audio"),
        Err(RegistryError::UnknownClass("UE.Click.Audio".to_owned()))
    );
}

#[test]
fn trigger_rejects_offsets_outside_block() {
    let mut trigger = Trigger::new(8);
    assert!(trigger.fire(7).is_ok());
    assert!(trigger.fire(8).is_err());
    assert_eq!(trigger.frames(), &[7]);
}

// Ambient floating dust using Bevy Hanabi
// A slow drift of faint gold motes filling the space around the tree
use bevy::prelude::*;
use bevy_hanabi::prelude::*;

const DUST_RATE: f32 = 80.0; // particles per second, ~500 alive at steady state
const DUST_RADIUS: f32 = 15.0;

pub struct AmbientDustPlugin;

impl Plugin for AmbientDustPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(HanabiPlugin)
            .add_systems(Startup, setup_ambient_dust);
    }
}

fn setup_ambient_dust(mut commands: Commands, mut effects: ResMut<Assets<EffectAsset>>) {
    // Faint gold that breathes in and out over each mote's life.
    let mut color_gradient = bevy_hanabi::Gradient::new();
    color_gradient.add_key(0.0, Vec4::new(1.0, 0.84, 0.0, 0.0));
    color_gradient.add_key(0.2, Vec4::new(1.2, 1.0, 0.3, 0.5));
    color_gradient.add_key(0.8, Vec4::new(1.0, 0.84, 0.0, 0.4));
    color_gradient.add_key(1.0, Vec4::new(0.8, 0.6, 0.0, 0.0));

    let mut size_gradient = bevy_hanabi::Gradient::new();
    size_gradient.add_key(0.0, Vec3::splat(0.03));
    size_gradient.add_key(0.5, Vec3::splat(0.06));
    size_gradient.add_key(1.0, Vec3::splat(0.02));

    let writer = ExprWriter::new();

    let init_pos = SetPositionSphereModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        radius: writer.lit(DUST_RADIUS).expr(),
        dimension: ShapeDimension::Volume,
    };

    // Barely moving; the lifetime fade does most of the work.
    let init_vel = SetVelocitySphereModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        speed: writer.lit(0.2).uniform(writer.lit(0.5)).expr(),
    };

    let init_age = SetAttributeModifier::new(Attribute::AGE, writer.lit(0.0).expr());
    let init_lifetime = SetAttributeModifier::new(
        Attribute::LIFETIME,
        writer.lit(4.0).uniform(writer.lit(8.0)).expr(),
    );
    let init_size = SetAttributeModifier::new(Attribute::SIZE, writer.lit(0.05).expr());

    let update_drift = AccelModifier::new(writer.lit(Vec3::new(0.0, 0.03, 0.0)).expr());

    let dust_module = writer.finish();

    let dust_effect = effects.add(
        EffectAsset::new(1024, SpawnerSettings::rate(DUST_RATE.into()), dust_module)
        .with_name("ambient_dust")
        .init(init_pos)
        .init(init_vel)
        .init(init_age)
        .init(init_lifetime)
        .init(init_size)
        .update(update_drift)
        .render(OrientModifier::new(OrientMode::FaceCameraPosition))
        .render(ColorOverLifetimeModifier::new(color_gradient))
        .render(SizeOverLifetimeModifier {
            gradient: size_gradient,
            screen_space_size: false,
        }),
    );

    commands.spawn((
        ParticleEffect::new(dust_effect),
        Transform::default(),
        Visibility::Visible,
        Name::new("AmbientDust"),
    ));

    info!("✨ Ambient dust effect ready");
}

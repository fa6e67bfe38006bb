use super::Topic::*;
use super::VerseRecord;

pub(crate) static RECORDS: &[VerseRecord] = &[
    VerseRecord {
        reference: "John 3:16",
        english: "For God so loved the world, that he gave his only begotten Son, that whosoever believeth in him should not perish, but have everlasting life.",
        spanish: "Porque de tal manera amó Dios al mundo, que ha dado a su Hijo unigénito, para que todo aquel que en él cree, no se pierda, mas tenga vida eterna.",
        topics: &[Love, Faith, Grace],
    },
    VerseRecord {
        reference: "1 Corinthians 13:4",
        english: "Love is patient, love is kind. It does not envy, it does not boast, it is not proud.",
        spanish: "El amor es sufrido, es benigno; el amor no tiene envidia, el amor no es jactancioso, no se envanece.",
        topics: &[Love, Patience],
    },
    VerseRecord {
        reference: "1 John 4:19",
        english: "We love him, because he first loved us.",
        spanish: "Nosotros le amamos a él, porque él nos amó primero.",
        topics: &[Love, Gratitude],
    },
    VerseRecord {
        reference: "Romans 8:38-39",
        english: "Neither death nor life, nor anything else in all creation, will be able to separate us from the love of God that is in Christ Jesus our Lord.",
        spanish: "Ni la muerte, ni la vida, ni ninguna otra cosa creada nos podrá separar del amor de Dios, que es en Cristo Jesús Señor nuestro.",
        topics: &[Love, Hope, Faith],
    },
    VerseRecord {
        reference: "1 Corinthians 16:14",
        english: "Let all that you do be done in love.",
        spanish: "Todas vuestras cosas sean hechas con amor.",
        topics: &[Love],
    },
    VerseRecord {
        reference: "Hebrews 11:1",
        english: "Now faith is the substance of things hoped for, the evidence of things not seen.",
        spanish: "Es, pues, la fe la certeza de lo que se espera, la convicción de lo que no se ve.",
        topics: &[Faith, Hope],
    },
    VerseRecord {
        reference: "Proverbs 3:5-6",
        english: "Trust in the Lord with all your heart and lean not on your own understanding; in all your ways acknowledge him, and he will make your paths straight.",
        spanish: "Fíate de Jehová de todo tu corazón, y no te apoyes en tu propia prudencia. Reconócelo en todos tus caminos, y él enderezará tus veredas.",
        topics: &[Faith, Wisdom, Guidance],
    },
    VerseRecord {
        reference: "Mark 11:24",
        english: "Whatever you ask for in prayer, believe that you have received it, and it will be yours.",
        spanish: "Todo lo que pidiereis orando, creed que lo recibiréis, y os vendrá.",
        topics: &[Faith],
    },
    VerseRecord {
        reference: "2 Corinthians 5:7",
        english: "For we walk by faith, not by sight.",
        spanish: "Porque por fe andamos, no por vista.",
        topics: &[Faith, Courage],
    },
    VerseRecord {
        reference: "Jeremiah 29:11",
        english: "For I know the plans I have for you, declares the Lord, plans to prosper you and not to harm you, plans to give you hope and a future.",
        spanish: "Porque yo sé los pensamientos que tengo acerca de vosotros, dice Jehová, pensamientos de paz, y no de mal, para daros el fin que esperáis.",
        topics: &[Hope, Guidance],
    },
    VerseRecord {
        reference: "Romans 15:13",
        english: "May the God of hope fill you with all joy and peace as you trust in him, so that you may overflow with hope.",
        spanish: "Y el Dios de esperanza os llene de todo gozo y paz en el creer, para que abundéis en esperanza.",
        topics: &[Hope, Joy, Peace],
    },
    VerseRecord {
        reference: "Isaiah 40:31",
        english: "Those who hope in the Lord will renew their strength. They will soar on wings like eagles; they will run and not grow weary.",
        spanish: "Los que esperan a Jehová tendrán nuevas fuerzas; levantarán alas como las águilas; correrán, y no se cansarán.",
        topics: &[Hope, Strength],
    },
    VerseRecord {
        reference: "Lamentations 3:22-23",
        english: "His compassions fail not. They are new every morning: great is thy faithfulness.",
        spanish: "Nunca decayeron sus misericordias. Nuevas son cada mañana; grande es tu fidelidad.",
        topics: &[Hope, Grace, Gratitude],
    },
    VerseRecord {
        reference: "Psalm 42:11",
        english: "Why, my soul, are you downcast? Put your hope in God, for I will yet praise him, my Savior and my God.",
        spanish: "¿Por qué te abates, oh alma mía? Espera en Dios; porque aún he de alabarle, salvación mía y Dios mío.",
        topics: &[Hope, Comfort],
    },
    VerseRecord {
        reference: "John 14:27",
        english: "Peace I leave with you, my peace I give unto you. Let not your heart be troubled, neither let it be afraid.",
        spanish: "La paz os dejo, mi paz os doy. No se turbe vuestro corazón, ni tenga miedo.",
        topics: &[Peace, Comfort],
    },
    VerseRecord {
        reference: "Philippians 4:6-7",
        english: "Do not be anxious about anything, but in every situation, by prayer, present your requests to God. And the peace of God will guard your hearts.",
        spanish: "Por nada estéis afanosos, sino sean conocidas vuestras peticiones delante de Dios. Y la paz de Dios guardará vuestros corazones.",
        topics: &[Peace, Faith],
    },
    VerseRecord {
        reference: "Isaiah 26:3",
        english: "You will keep in perfect peace those whose minds are steadfast, because they trust in you.",
        spanish: "Tú guardarás en completa paz a aquel cuyo pensamiento en ti persevera; porque en ti ha confiado.",
        topics: &[Peace, Faith],
    },
    VerseRecord {
        reference: "Matthew 11:28-29",
        english: "Come unto me, all ye that labour and are heavy laden, and I will give you rest. For I am gentle and humble in heart.",
        spanish: "Venid a mí todos los que estáis trabajados y cargados, y yo os haré descansar. Porque soy manso y humilde de corazón.",
        topics: &[Peace, Comfort],
    },
    VerseRecord {
        reference: "Psalm 46:10",
        english: "Be still, and know that I am God.",
        spanish: "Estad quietos, y conoced que yo soy Dios.",
        topics: &[Peace, Faith],
    },
    VerseRecord {
        reference: "Isaiah 30:15",
        english: "In quietness and in confidence shall be your strength.",
        spanish: "En quietud y en confianza será vuestra fortaleza.",
        topics: &[Peace, Strength],
    },
    VerseRecord {
        reference: "Philippians 4:13",
        english: "I can do all things through Christ which strengtheneth me.",
        spanish: "Todo lo puedo en Cristo que me fortalece.",
        topics: &[Strength, Courage],
    },
    VerseRecord {
        reference: "Isaiah 41:10",
        english: "Fear thou not; for I am with thee: be not dismayed; for I am thy God: I will strengthen thee; yea, I will help thee.",
        spanish: "No temas, porque yo estoy contigo; no desmayes, porque yo soy tu Dios que te esfuerzo; siempre te ayudaré.",
        topics: &[Strength, Comfort, Courage],
    },
    VerseRecord {
        reference: "Psalm 28:7",
        english: "The Lord is my strength and my shield; my heart trusts in him, and he helps me.",
        spanish: "Jehová es mi fortaleza y mi escudo; en él confió mi corazón, y fui ayudado.",
        topics: &[Strength, Faith],
    },
    VerseRecord {
        reference: "2 Corinthians 12:9",
        english: "My grace is sufficient for thee: for my strength is made perfect in weakness.",
        spanish: "Bástate mi gracia; porque mi poder se perfecciona en la debilidad.",
        topics: &[Strength, Grace],
    },
    VerseRecord {
        reference: "Nehemiah 8:10",
        english: "Do not grieve, for the joy of the Lord is your strength.",
        spanish: "No os entristezcáis, porque el gozo de Jehová es vuestra fuerza.",
        topics: &[Joy, Strength],
    },
    VerseRecord {
        reference: "Psalm 118:24",
        english: "This is the day which the Lord hath made; we will rejoice and be glad in it.",
        spanish: "Este es el día que hizo Jehová; nos gozaremos y alegraremos en él.",
        topics: &[Joy, Gratitude],
    },
    VerseRecord {
        reference: "Philippians 4:4",
        english: "Rejoice in the Lord always: and again I say, Rejoice.",
        spanish: "Regocijaos en el Señor siempre. Otra vez digo: ¡Regocijaos!",
        topics: &[Joy],
    },
    VerseRecord {
        reference: "Psalm 16:11",
        english: "You make known to me the path of life; you will fill me with joy in your presence.",
        spanish: "Me mostrarás la senda de la vida; en tu presencia hay plenitud de gozo.",
        topics: &[Joy, Guidance],
    },
    VerseRecord {
        reference: "James 1:5",
        english: "If any of you lacks wisdom, you should ask God, who gives generously to all without finding fault.",
        spanish: "Si alguno de vosotros tiene falta de sabiduría, pídala a Dios, el cual da a todos abundantemente y sin reproche.",
        topics: &[Wisdom, Guidance],
    },
    VerseRecord {
        reference: "Proverbs 9:10",
        english: "The fear of the Lord is the beginning of wisdom, and knowledge of the Holy One is understanding.",
        spanish: "El temor de Jehová es el principio de la sabiduría, y el conocimiento del Santísimo es la inteligencia.",
        topics: &[Wisdom],
    },
    VerseRecord {
        reference: "Psalm 119:105",
        english: "Thy word is a lamp unto my feet, and a light unto my path.",
        spanish: "Lámpara es a mis pies tu palabra, y lumbrera a mi camino.",
        topics: &[Guidance, Wisdom],
    },
    VerseRecord {
        reference: "Psalm 32:8",
        english: "I will instruct you and teach you in the way you should go; I will counsel you with my loving eye on you.",
        spanish: "Te haré entender, y te enseñaré el camino en que debes andar; sobre ti fijaré mis ojos.",
        topics: &[Guidance, Wisdom],
    },
    VerseRecord {
        reference: "Psalm 23:4",
        english: "Yea, though I walk through the valley of the shadow of death, I will fear no evil: for thou art with me; thy rod and thy staff they comfort me.",
        spanish: "Aunque ande en valle de sombra de muerte, no temeré mal alguno, porque tú estarás conmigo; tu vara y tu cayado me infundirán aliento.",
        topics: &[Comfort, Courage],
    },
    VerseRecord {
        reference: "1 Peter 5:7",
        english: "Casting all your care upon him; for he careth for you.",
        spanish: "Echando toda vuestra ansiedad sobre él, porque él tiene cuidado de vosotros.",
        topics: &[Comfort, Peace],
    },
    VerseRecord {
        reference: "Psalm 34:18",
        english: "The Lord is close to the brokenhearted and saves those who are crushed in spirit.",
        spanish: "Cercano está Jehová a los quebrantados de corazón; y salva a los contritos de espíritu.",
        topics: &[Comfort],
    },
    VerseRecord {
        reference: "Psalm 46:1",
        english: "God is our refuge and strength, a very present help in trouble.",
        spanish: "Dios es nuestro amparo y fortaleza, nuestro pronto auxilio en las tribulaciones.",
        topics: &[Comfort, Strength],
    },
    VerseRecord {
        reference: "Joshua 1:9",
        english: "Be strong and courageous. Do not be afraid; do not be discouraged, for the Lord your God will be with you wherever you go.",
        spanish: "Esfuérzate y sé valiente; no temas ni desmayes, porque Jehová tu Dios estará contigo en dondequiera que vayas.",
        topics: &[Courage, Strength],
    },
    VerseRecord {
        reference: "2 Timothy 1:7",
        english: "For God hath not given us the spirit of fear; but of power, and of love, and of a sound mind.",
        spanish: "Porque no nos ha dado Dios espíritu de cobardía, sino de poder, de amor y de dominio propio.",
        topics: &[Courage, Love],
    },
    VerseRecord {
        reference: "Deuteronomy 31:6",
        english: "Be strong and of a good courage, fear not: for the Lord thy God, he it is that doth go with thee; he will not fail thee.",
        spanish: "Esforzaos y cobrad ánimo; no temáis, porque Jehová tu Dios es el que va contigo; no te dejará, ni te desamparará.",
        topics: &[Courage],
    },
    VerseRecord {
        reference: "Ephesians 2:8",
        english: "For by grace are ye saved through faith; and that not of yourselves: it is the gift of God.",
        spanish: "Porque por gracia sois salvos por medio de la fe; y esto no de vosotros, pues es don de Dios.",
        topics: &[Grace, Faith],
    },
    VerseRecord {
        reference: "Hebrews 4:16",
        english: "Let us then approach God's throne of grace with confidence, so that we may receive mercy and find grace to help us in our time of need.",
        spanish: "Acerquémonos, pues, confiadamente al trono de la gracia, para alcanzar misericordia y hallar gracia para el oportuno socorro.",
        topics: &[Grace, Courage],
    },
    VerseRecord {
        reference: "1 Thessalonians 5:18",
        english: "In every thing give thanks: for this is the will of God in Christ Jesus concerning you.",
        spanish: "Dad gracias en todo, porque esta es la voluntad de Dios para con vosotros en Cristo Jesús.",
        topics: &[Gratitude],
    },
    VerseRecord {
        reference: "Psalm 107:1",
        english: "O give thanks unto the Lord, for he is good: for his mercy endureth for ever.",
        spanish: "Alabad a Jehová, porque él es bueno; porque para siempre es su misericordia.",
        topics: &[Gratitude, Grace],
    },
    VerseRecord {
        reference: "Colossians 3:13",
        english: "Bear with each other and forgive one another. Forgive as the Lord forgave you.",
        spanish: "Soportándoos unos a otros, y perdonándoos unos a otros. De la manera que Cristo os perdonó, así también hacedlo vosotros.",
        topics: &[Forgiveness, Patience, Love],
    },
    VerseRecord {
        reference: "1 John 1:9",
        english: "If we confess our sins, he is faithful and just to forgive us our sins, and to cleanse us from all unrighteousness.",
        spanish: "Si confesamos nuestros pecados, él es fiel y justo para perdonar nuestros pecados, y limpiarnos de toda maldad.",
        topics: &[Forgiveness, Grace],
    },
    VerseRecord {
        reference: "Ephesians 4:32",
        english: "Be kind and compassionate to one another, forgiving each other, just as in Christ God forgave you.",
        spanish: "Sed benignos unos con otros, misericordiosos, perdonándoos unos a otros, como Dios también os perdonó a vosotros en Cristo.",
        topics: &[Forgiveness, Love],
    },
    VerseRecord {
        reference: "Romans 12:12",
        english: "Be joyful in hope, patient in affliction, faithful in prayer.",
        spanish: "Gozosos en la esperanza; sufridos en la tribulación; constantes en la oración.",
        topics: &[Patience, Hope, Joy],
    },
    VerseRecord {
        reference: "Psalm 27:14",
        english: "Wait for the Lord; be strong and take heart and wait for the Lord.",
        spanish: "Aguarda a Jehová; esfuérzate, y aliéntese tu corazón; sí, espera a Jehová.",
        topics: &[Patience, Courage],
    },
    VerseRecord {
        reference: "Galatians 6:9",
        english: "Let us not become weary in doing good, for at the proper time we will reap a harvest if we do not give up.",
        spanish: "No nos cansemos, pues, de hacer bien; porque a su tiempo segaremos, si no desmayamos.",
        topics: &[Patience, Hope],
    },
    VerseRecord {
        reference: "Psalm 19:1",
        english: "The heavens declare the glory of God; and the firmament sheweth his handywork.",
        spanish: "Los cielos cuentan la gloria de Dios, y el firmamento anuncia la obra de sus manos.",
        topics: &[Gratitude, Joy],
    },
    VerseRecord {
        reference: "Luke 2:11",
        english: "For unto you is born this day in the city of David a Saviour, which is Christ the Lord.",
        spanish: "Que os ha nacido hoy, en la ciudad de David, un Salvador, que es Cristo el Señor.",
        topics: &[Joy, Hope],
    },
    VerseRecord {
        reference: "Isaiah 9:6",
        english: "For unto us a child is born, unto us a son is given: and his name shall be called Wonderful, Counsellor, The mighty God, The Prince of Peace.",
        spanish: "Porque un niño nos es nacido, hijo nos es dado; y se llamará su nombre Admirable, Consejero, Dios Fuerte, Príncipe de Paz.",
        topics: &[Peace, Hope],
    },
    VerseRecord {
        reference: "Matthew 28:6",
        english: "He is not here: for he is risen, as he said. Come, see the place where the Lord lay.",
        spanish: "No está aquí, pues ha resucitado, como dijo. Venid, ved el lugar donde fue puesto el Señor.",
        topics: &[Hope, Faith, Joy],
    },
    VerseRecord {
        reference: "John 11:25",
        english: "Jesus said unto her, I am the resurrection, and the life: he that believeth in me, though he were dead, yet shall he live.",
        spanish: "Le dijo Jesús: Yo soy la resurrección y la vida; el que cree en mí, aunque esté muerto, vivirá.",
        topics: &[Faith, Hope],
    },
];
